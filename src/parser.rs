//! Response parsing: raw model text to a structured payload.

use crate::error::TourneyError;
use serde_json::Value;

pub trait ResponseParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<Value, TourneyError>;
}

/// Parses a JSON object out of a model response.
///
/// Accepts the object bare, wrapped in a Markdown code fence, or surrounded by
/// prose (the outermost `{ ... }` slice is tried last). Non-object JSON is
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponseParser;

impl ResponseParser for JsonResponseParser {
    fn parse(&self, raw: &str) -> Result<Value, TourneyError> {
        let body = strip_code_fence(raw.trim());

        let value = match serde_json::from_str::<Value>(body) {
            Ok(value) => value,
            Err(first_err) => outermost_object(body)
                .and_then(|slice| serde_json::from_str::<Value>(slice).ok())
                .ok_or_else(|| {
                    TourneyError::ParseFailed(format!(
                        "Failed to parse LLM response as JSON: {}",
                        first_err
                    ))
                })?,
        };

        if !value.is_object() {
            return Err(TourneyError::ParseFailed(
                "Failed to parse LLM response as JSON: expected an object".to_string(),
            ));
        }
        Ok(value)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
