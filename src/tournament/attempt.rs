//! Per-attempt audit records.

use super::runner::AttemptSettlement;
use crate::error::TourneyError;
use crate::scoring::CompositeScore;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Success,
    Failure,
}

/// Coarse classification of why an attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Provider,
    Parse,
    Panicked,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Provider => "provider",
            FailureKind::Parse => "parse",
            FailureKind::Panicked => "panicked",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptFailure {
    pub kind: FailureKind,
    pub reason: String,
}

impl AttemptFailure {
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<&TourneyError> for AttemptFailure {
    fn from(err: &TourneyError) -> Self {
        let kind = match err {
            TourneyError::Timeout { .. } => FailureKind::Timeout,
            TourneyError::ParseFailed(_) => FailureKind::Parse,
            _ => FailureKind::Provider,
        };
        Self::new(kind, err.to_string())
    }
}

/// One generation attempt as it appears in the tournament audit trail.
///
/// Exactly one of `content` and `failure_reason` is set, matching `status`.
/// `score` is set only for successes. Unset fields serialize as `null`, so
/// every record has the same keys.
#[derive(Debug, Clone, Serialize)]
pub struct Attempt {
    index: usize,
    temperature: f32,
    status: AttemptStatus,
    content: Option<Value>,
    content_digest: Option<String>,
    failure_reason: Option<String>,
    failure_kind: Option<FailureKind>,
    duration_ms: u64,
    score: Option<CompositeScore>,
}

impl Attempt {
    pub(crate) fn settled(index: usize, temperature: f32, settlement: AttemptSettlement) -> Self {
        let AttemptSettlement {
            duration_ms,
            outcome,
        } = settlement;
        match outcome {
            Ok(content) => Self {
                index,
                temperature,
                status: AttemptStatus::Success,
                content_digest: content_digest(&content),
                content: Some(content),
                failure_reason: None,
                failure_kind: None,
                duration_ms,
                score: None,
            },
            Err(failure) => Self::failed(index, temperature, failure, duration_ms),
        }
    }

    pub(crate) fn failed(
        index: usize,
        temperature: f32,
        failure: AttemptFailure,
        duration_ms: u64,
    ) -> Self {
        Self {
            index,
            temperature,
            status: AttemptStatus::Failure,
            content: None,
            content_digest: None,
            failure_reason: Some(failure.reason),
            failure_kind: Some(failure.kind),
            duration_ms,
            score: None,
        }
    }

    /// Attaches a score. Failures stay unscored.
    pub(crate) fn with_score(mut self, score: CompositeScore) -> Self {
        if self.is_success() {
            self.score = Some(score);
        }
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == AttemptStatus::Success
    }

    pub fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    /// Hex blake3 digest of the canonical JSON encoding of the content.
    pub fn content_digest(&self) -> Option<&str> {
        self.content_digest.as_deref()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure_kind
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn score(&self) -> Option<CompositeScore> {
        self.score
    }
}

fn content_digest(content: &Value) -> Option<String> {
    let bytes = serde_json::to_vec(content).ok()?;
    Some(hex::encode(blake3::hash(&bytes).as_bytes()))
}
