//! Internal consistency of the plan's numbers.
//!
//! Market sizing must nest (`tam >= sam >= som`), the obtainable share must be
//! plausible, and a month of channel budget should buy at least one customer.
//! Values that are present but inconsistent keep partial credit.

use super::fields::{list, positive, EXPECTED_CHANNELS, EXPECTED_TIERS};
use super::{group_credit, Dimension};
use serde_json::Value;

const HIERARCHY_CAP: f64 = 15.0;
const SHARE_CAP: f64 = 6.0;
const ACQUISITION_CAP: f64 = 4.0;

const HIERARCHY_PRESENT: f64 = 1.0;
const HIERARCHY_ORDERED: f64 = 2.0;
const SHARE_PLAUSIBLE: f64 = 2.0;
const SHARE_PRESENT: f64 = 1.0;

/// Largest `som / tam` treated as plausible.
const MAX_OBTAINABLE_SHARE: f64 = 0.5;

pub struct InternalConsistency;

impl Dimension for InternalConsistency {
    fn evaluate(&self, content: &Value, _context: &Value) -> f64 {
        let (hierarchy, share) = market_sizing(content);
        hierarchy + share + acquisition(content)
    }
}

struct MarketSize {
    tam: f64,
    sam: f64,
    som: f64,
}

fn market_size(tier: &Value) -> Option<MarketSize> {
    Some(MarketSize {
        tam: positive(tier, "tam")?,
        sam: positive(tier, "sam")?,
        som: positive(tier, "som")?,
    })
}

/// Returns `(hierarchy credit, share credit)`.
fn market_sizing(content: &Value) -> (f64, f64) {
    let sizes: Vec<MarketSize> = list(content, "tiers")
        .iter()
        .take(EXPECTED_TIERS)
        .filter_map(market_size)
        .collect();

    let per_tier_hierarchy = HIERARCHY_PRESENT + 2.0 * HIERARCHY_ORDERED;
    let hierarchy: f64 = sizes
        .iter()
        .map(|s| {
            let mut credit = HIERARCHY_PRESENT;
            if s.tam >= s.sam {
                credit += HIERARCHY_ORDERED;
            }
            if s.sam >= s.som {
                credit += HIERARCHY_ORDERED;
            }
            credit
        })
        .sum();

    let share: f64 = sizes
        .iter()
        .map(|s| {
            if s.som / s.tam <= MAX_OBTAINABLE_SHARE {
                SHARE_PLAUSIBLE
            } else {
                SHARE_PRESENT
            }
        })
        .sum();

    let tiers = EXPECTED_TIERS as f64;
    (
        group_credit(HIERARCHY_CAP, hierarchy, per_tier_hierarchy * tiers),
        group_credit(SHARE_CAP, share, SHARE_PLAUSIBLE * tiers),
    )
}

fn acquisition(content: &Value) -> f64 {
    let (credits, considered) = list(content, "channels")
        .iter()
        .take(EXPECTED_CHANNELS)
        .filter_map(|c| Some((positive(c, "monthly_budget")?, positive(c, "expected_cac")?)))
        .fold((0.0, 0usize), |(credits, n), (budget, cac)| {
            let credit = if cac <= budget { 1.0 } else { 0.5 };
            (credits + credit, n + 1)
        });
    group_credit(ACQUISITION_CAP, credits, considered as f64)
}
