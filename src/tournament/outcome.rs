//! Tournament result and audit trail.

use super::attempt::Attempt;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No attempt produced usable content.
    AllAttemptsFailed,
    /// The best composite was strictly below the threshold.
    BelowThreshold,
}

impl FallbackReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackReason::AllAttemptsFailed => "all_attempts_failed",
            FallbackReason::BelowThreshold => "below_threshold",
        }
    }
}

/// Full audit of one tournament.
///
/// `generations` has one entry per requested temperature, in request order.
/// `winner_index` is set exactly when `fallback` is false.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentOutcome {
    generations: Vec<Attempt>,
    winner_index: Option<usize>,
    fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<FallbackReason>,
    threshold: f64,
    total_duration_ms: u64,
}

impl TournamentOutcome {
    pub(crate) fn won(
        generations: Vec<Attempt>,
        winner_index: usize,
        threshold: f64,
        total_duration_ms: u64,
    ) -> Self {
        Self {
            generations,
            winner_index: Some(winner_index),
            fallback: false,
            fallback_reason: None,
            threshold,
            total_duration_ms,
        }
    }

    pub(crate) fn fell_back(
        generations: Vec<Attempt>,
        reason: FallbackReason,
        threshold: f64,
        total_duration_ms: u64,
    ) -> Self {
        Self {
            generations,
            winner_index: None,
            fallback: true,
            fallback_reason: Some(reason),
            threshold,
            total_duration_ms,
        }
    }

    pub fn generations(&self) -> &[Attempt] {
        &self.generations
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner_index
    }

    pub fn winner(&self) -> Option<&Attempt> {
        self.winner_index.and_then(|i| self.generations.get(i))
    }

    pub fn fallback(&self) -> bool {
        self.fallback
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        self.fallback_reason
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.total_duration_ms
    }

    pub fn success_count(&self) -> usize {
        self.generations.iter().filter(|a| a.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.generations.len() - self.success_count()
    }

    /// Best composite among scored successes, winner or not.
    pub fn best_score(&self) -> Option<u8> {
        self.generations
            .iter()
            .filter_map(|a| a.score().map(|s| s.total()))
            .max()
    }
}

/// What [`super::Tournament::run`] returns: the winning content (absent on
/// fallback) and the audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentRun {
    pub result: Option<Value>,
    pub outcome: TournamentOutcome,
}
