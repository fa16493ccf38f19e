//! Defensive accessors over untyped payload fields.

use chrono::NaiveDate;
use serde_json::Value;

/// Tiers the GTM normalizer always emits.
pub(crate) const EXPECTED_TIERS: usize = 3;
/// Channels the GTM normalizer always emits.
pub(crate) const EXPECTED_CHANNELS: usize = 8;
/// Length of the default launch timeline.
pub(crate) const EXPECTED_MILESTONES: usize = 3;

pub(crate) const CHANNEL_TYPES: [&str; 4] = ["paid", "organic", "earned", "owned"];

const PLACEHOLDERS: &[&str] = &[
    "", "-", "--", "...", "?", "n/a", "na", "none", "null", "tbd", "tba", "todo", "unknown",
    "placeholder", "example", "sample", "default", "various", "misc",
];

const GENERATED_PREFIXES: &[&str] = &["tier", "channel", "milestone", "segment", "kpi"];

const GENERIC_MILESTONES: &[&str] = &["soft launch", "public launch", "growth phase"];

/// Array under `key`, or an empty slice.
pub(crate) fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Trimmed, non-empty string under `key`.
pub(crate) fn text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// String under `key` that is not filler.
pub(crate) fn specific_text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    text(value, key).filter(|s| is_specific(s))
}

/// Finite number under `key`.
pub(crate) fn number(value: &Value, key: &str) -> Option<f64> {
    value
        .get(key)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}

/// Strictly positive number under `key`.
pub(crate) fn positive(value: &Value, key: &str) -> Option<f64> {
    number(value, key).filter(|n| *n > 0.0)
}

/// False for placeholder filler and generated names such as `Tier 2`.
pub(crate) fn is_specific(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    if PLACEHOLDERS.contains(&lowered.as_str()) || lowered.starts_with("lorem ipsum") {
        return false;
    }
    !is_generated_name(&lowered)
}

fn is_generated_name(lowered: &str) -> bool {
    let Some((prefix, suffix)) = lowered.rsplit_once(' ') else {
        return false;
    };
    GENERATED_PREFIXES.contains(&prefix)
        && !suffix.is_empty()
        && suffix.chars().all(|c| c.is_ascii_digit())
}

pub(crate) fn is_generic_milestone(text: &str) -> bool {
    GENERIC_MILESTONES.contains(&text.trim().to_lowercase().as_str())
}

/// `YYYY-MM-DD` calendar date.
pub(crate) fn is_iso_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").is_ok()
}

/// Valid channel type, lowercased.
pub(crate) fn channel_type(channel: &Value) -> Option<&'static str> {
    let raw = text(channel, "channelType")?.to_lowercase();
    CHANNEL_TYPES.iter().copied().find(|t| *t == raw)
}

pub(crate) fn count_where<'a, I, F>(items: I, predicate: F) -> usize
where
    I: IntoIterator<Item = &'a Value>,
    F: Fn(&Value) -> bool,
{
    items.into_iter().filter(|item| predicate(*item)).count()
}
