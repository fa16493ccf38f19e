//! Rubric scoring against known go-to-market payloads.

use crate::integration::test_utils::{padded_plan, rich_plan, venture_brief};
use serde_json::json;
use tourney::scoring::{score, DimensionKind, Rubric, Scorer};

fn dims(content: &serde_json::Value, context: &serde_json::Value) -> [u8; 4] {
    let composite = score(content, context);
    DimensionKind::ALL.map(|kind| composite.get(kind))
}

#[test]
fn concrete_plan_scores_high_on_every_dimension() {
    let composite = score(&rich_plan(), &venture_brief());
    assert_eq!(dims(&rich_plan(), &venture_brief()), [25, 24, 20, 25]);
    assert_eq!(composite.total(), 94);
}

#[test]
fn placeholder_padding_earns_almost_nothing() {
    let composite = score(&padded_plan(), &venture_brief());
    assert_eq!(dims(&padded_plan(), &venture_brief()), [2, 5, 0, 0]);
    assert_eq!(composite.total(), 7);
}

#[test]
fn empty_content_scores_zero() {
    assert_eq!(score(&json!({}), &venture_brief()).total(), 0);
    assert_eq!(score(&json!({}), &json!({})).total(), 0);
}

#[test]
fn non_object_content_scores_zero() {
    assert_eq!(score(&serde_json::Value::Null, &venture_brief()).total(), 0);
    assert_eq!(score(&json!([]), &venture_brief()).total(), 0);
}

#[test]
fn missing_context_only_costs_alignment() {
    let with_brief = dims(&rich_plan(), &venture_brief());
    let without = dims(&rich_plan(), &json!({}));
    assert_eq!(without[2], 0);
    assert_eq!(without[0], with_brief[0]);
    assert_eq!(without[1], with_brief[1]);
    assert_eq!(without[3], with_brief[3]);
}

#[test]
fn scoring_is_pure() {
    let content = rich_plan();
    let context = venture_brief();
    let rubric = Rubric::default();
    let first = rubric.score(&content, &context);
    let second = rubric.score(&content, &context);
    assert_eq!(first, second);
    assert_eq!(content, rich_plan());
    assert_eq!(context, venture_brief());
}

#[test]
fn composite_is_the_sum_of_its_dimensions() {
    for content in [rich_plan(), padded_plan(), json!({})] {
        let composite = score(&content, &venture_brief());
        let sum: u32 = composite.dimensions().iter().map(|d| u32::from(d.points)).sum();
        assert_eq!(u32::from(composite.total()), sum);
        assert!(composite.dimensions().iter().all(|d| d.points <= 25));
    }
}
