//! Winner selection.
//!
//! Highest composite wins; equal composites go to the lowest original index.
//! The order is total and explicit so the outcome never depends on sort
//! stability or on the order in which attempts settled.

use super::attempt::Attempt;
use std::cmp::Ordering;

/// Orders scored successes best-first.
pub fn compare_candidates(a: &Attempt, b: &Attempt) -> Ordering {
    let a_total = a.score().map(|s| s.total());
    let b_total = b.score().map(|s| s.total());
    b_total
        .cmp(&a_total)
        .then_with(|| a.index().cmp(&b.index()))
}

/// Scored successes, best first.
pub fn rank(generations: &[Attempt]) -> Vec<&Attempt> {
    let mut ranked: Vec<&Attempt> = generations
        .iter()
        .filter(|a| a.is_success() && a.score().is_some())
        .collect();
    ranked.sort_unstable_by(|a, b| compare_candidates(a, b));
    ranked
}

/// The winning candidate, if any attempt succeeded.
pub fn select(generations: &[Attempt]) -> Option<&Attempt> {
    generations
        .iter()
        .filter(|a| a.is_success() && a.score().is_some())
        .min_by(|a, b| compare_candidates(a, b))
}
