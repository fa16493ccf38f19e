//! Alignment: does the plan talk about the venture it was asked about?
//!
//! Compares significant terms of the content against the caller's context
//! (a venture brief with `description`, `problemStatement`, `valueProp`,
//! `targetMarket`, ...). The context is not interpreted beyond its strings.

use super::fields::{list, text};
use super::terms::{terms, value_terms, Terms};
use super::{group_credit, Dimension};
use serde_json::Value;

const OVERLAP_CAP: f64 = 15.0;
const TARGET_MARKET_CAP: f64 = 6.0;
const PROBLEM_FIT_CAP: f64 = 4.0;

/// Context terms beyond this many do not raise the bar for full overlap credit.
const OVERLAP_SATURATION: usize = 12;
const PROBLEM_SATURATION: usize = 3;

pub struct Alignment;

impl Dimension for Alignment {
    fn evaluate(&self, content: &Value, context: &Value) -> f64 {
        overall_overlap(content, context)
            + target_market_fit(content, context)
            + problem_fit(content, context)
    }
}

fn matched(wanted: &Terms, present: &Terms) -> usize {
    wanted.intersection(present).count()
}

fn field_terms(context: &Value, key: &str) -> Terms {
    text(context, key).map(terms).unwrap_or_default()
}

fn overall_overlap(content: &Value, context: &Value) -> f64 {
    let wanted = value_terms(context);
    let present = value_terms(content);
    group_credit(
        OVERLAP_CAP,
        matched(&wanted, &present) as f64,
        wanted.len().min(OVERLAP_SATURATION) as f64,
    )
}

fn target_market_fit(content: &Value, context: &Value) -> f64 {
    let wanted = field_terms(context, "targetMarket");
    let present = content.get("tiers").map(value_terms).unwrap_or_default();
    group_credit(
        TARGET_MARKET_CAP,
        matched(&wanted, &present) as f64,
        wanted.len() as f64,
    )
}

fn problem_fit(content: &Value, context: &Value) -> f64 {
    let wanted = field_terms(context, "problemStatement");
    let present: Terms = list(content, "tiers")
        .iter()
        .flat_map(|tier| list(tier, "painPoints"))
        .flat_map(value_terms)
        .collect();
    group_credit(
        PROBLEM_FIT_CAP,
        matched(&wanted, &present) as f64,
        wanted.len().min(PROBLEM_SATURATION) as f64,
    )
}
