//! Actionability: can someone execute this plan on Monday?
//!
//! Resourcing (10) rewards funded channels and costed acquisition, execution
//! metadata (8) rewards dated, owned milestones and channels routed to a real
//! tier, and diversity (7) rewards a spread of channel types.

use super::fields::{
    channel_type, count_where, is_iso_date, list, positive, specific_text, text, CHANNEL_TYPES,
    EXPECTED_CHANNELS, EXPECTED_MILESTONES,
};
use super::{group_credit, Dimension};
use serde_json::Value;
use std::collections::BTreeSet;

const FUNDING_CAP: f64 = 6.0;
const CAC_CAP: f64 = 4.0;
const MILESTONE_CAP: f64 = 5.0;
const ROUTING_CAP: f64 = 3.0;
const DIVERSITY_CAP: f64 = 7.0;

pub struct Actionability;

impl Dimension for Actionability {
    fn evaluate(&self, content: &Value, _context: &Value) -> f64 {
        resourcing(content) + execution_metadata(content) + diversity(content)
    }
}

fn channels<'a>(content: &'a Value) -> impl Iterator<Item = &'a Value> + 'a {
    list(content, "channels").iter().take(EXPECTED_CHANNELS)
}

fn resourcing(content: &Value) -> f64 {
    let expected = EXPECTED_CHANNELS as f64;
    let funded = count_where(channels(content), |c| positive(c, "monthly_budget").is_some());
    let costed = count_where(channels(content), |c| positive(c, "expected_cac").is_some());
    group_credit(FUNDING_CAP, funded as f64, expected) + group_credit(CAC_CAP, costed as f64, expected)
}

fn execution_metadata(content: &Value) -> f64 {
    let scheduled = count_where(
        list(content, "launch_timeline").iter().take(EXPECTED_MILESTONES),
        |entry| {
            text(entry, "date").is_some_and(is_iso_date) && specific_text(entry, "owner").is_some()
        },
    );

    let tier_names: BTreeSet<&str> = list(content, "tiers")
        .iter()
        .filter_map(|tier| text(tier, "name"))
        .collect();
    let routed = count_where(channels(content), |c| {
        text(c, "primaryTier").is_some_and(|tier| tier_names.contains(tier))
    });

    group_credit(
        MILESTONE_CAP,
        scheduled as f64,
        EXPECTED_MILESTONES as f64,
    ) + group_credit(ROUTING_CAP, routed as f64, EXPECTED_CHANNELS as f64)
}

fn diversity(content: &Value) -> f64 {
    let distinct: BTreeSet<&str> = channels(content).filter_map(channel_type).collect();
    group_credit(
        DIVERSITY_CAP,
        distinct.len() as f64,
        CHANNEL_TYPES.len() as f64,
    )
}
