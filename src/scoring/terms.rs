//! Significant-term extraction for alignment scoring.

use serde_json::Value;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

const MIN_TERM_CHARS: usize = 4;

// Only words of MIN_TERM_CHARS or more need listing.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "also", "because", "been", "before", "being", "between",
    "both", "could", "does", "doing", "down", "during", "each", "every", "from", "further",
    "have", "having", "here", "into", "just", "more", "most", "much", "must", "only", "other",
    "over", "same", "should", "some", "such", "than", "that", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "under", "until", "very", "well", "were",
    "what", "when", "where", "which", "while", "will", "with", "within", "without", "would",
    "your", "yours", "ours",
];

pub(crate) type Terms = BTreeSet<String>;

/// Normalized significant terms of a text.
pub(crate) fn terms(text: &str) -> Terms {
    let normalized: String = text.nfkc().collect::<String>().to_lowercase();
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TERM_CHARS)
        .filter(|token| !token.chars().all(|c| c.is_numeric()))
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Terms of every string reachable inside `value`. Object keys are ignored.
pub(crate) fn value_terms(value: &Value) -> Terms {
    let mut out = Terms::new();
    collect(value, &mut out);
    out
}

fn collect(value: &Value, out: &mut Terms) {
    match value {
        Value::String(s) => out.extend(terms(s)),
        Value::Array(items) => items.iter().for_each(|item| collect(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect(item, out)),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
