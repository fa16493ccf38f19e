//! Specificity: concrete detail over placeholder filler.
//!
//! | group    | cap | checks                                                        |
//! |----------|-----|---------------------------------------------------------------|
//! | tiers    | 10  | name, description (>= 15 chars), persona, a pain point; x 3   |
//! | channels | 10  | name, primary KPI; x 8                                        |
//! | timeline | 5   | non-default milestone, owner, ISO date; x 3                   |

use super::fields::{
    is_generic_milestone, is_iso_date, is_specific, list, specific_text, text, EXPECTED_CHANNELS,
    EXPECTED_MILESTONES, EXPECTED_TIERS,
};
use super::{group_credit, Dimension};
use serde_json::Value;

const TIER_CAP: f64 = 10.0;
const CHANNEL_CAP: f64 = 10.0;
const TIMELINE_CAP: f64 = 5.0;

const TIER_CHECKS: usize = 4;
const CHANNEL_CHECKS: usize = 2;
const MILESTONE_CHECKS: usize = 3;

const MIN_DESCRIPTION_CHARS: usize = 15;

pub struct Specificity;

impl Dimension for Specificity {
    fn evaluate(&self, content: &Value, _context: &Value) -> f64 {
        tier_detail(content) + channel_detail(content) + timeline_detail(content)
    }
}

fn tier_detail(content: &Value) -> f64 {
    let passed: usize = list(content, "tiers")
        .iter()
        .take(EXPECTED_TIERS)
        .map(|tier| {
            let description = specific_text(tier, "description")
                .filter(|d| d.chars().count() >= MIN_DESCRIPTION_CHARS);
            let pain_point = list(tier, "painPoints")
                .iter()
                .filter_map(Value::as_str)
                .any(|p| !p.trim().is_empty() && is_specific(p));
            [
                specific_text(tier, "name").is_some(),
                description.is_some(),
                specific_text(tier, "persona").is_some(),
                pain_point,
            ]
            .into_iter()
            .filter(|passed| *passed)
            .count()
        })
        .sum();
    group_credit(
        TIER_CAP,
        passed as f64,
        (EXPECTED_TIERS * TIER_CHECKS) as f64,
    )
}

fn channel_detail(content: &Value) -> f64 {
    let passed: usize = list(content, "channels")
        .iter()
        .take(EXPECTED_CHANNELS)
        .map(|channel| {
            usize::from(specific_text(channel, "name").is_some())
                + usize::from(specific_text(channel, "primary_kpi").is_some())
        })
        .sum();
    group_credit(
        CHANNEL_CAP,
        passed as f64,
        (EXPECTED_CHANNELS * CHANNEL_CHECKS) as f64,
    )
}

fn timeline_detail(content: &Value) -> f64 {
    let passed: usize = list(content, "launch_timeline")
        .iter()
        .take(EXPECTED_MILESTONES)
        .map(|entry| {
            let milestone = specific_text(entry, "milestone").filter(|m| !is_generic_milestone(m));
            usize::from(milestone.is_some())
                + usize::from(specific_text(entry, "owner").is_some())
                + usize::from(text(entry, "date").is_some_and(is_iso_date))
        })
        .sum();
    group_credit(
        TIMELINE_CAP,
        passed as f64,
        (EXPECTED_MILESTONES * MILESTONE_CHECKS) as f64,
    )
}
