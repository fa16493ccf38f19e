//! Event schema for tournament telemetry.

use super::types::now_rfc3339;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOURNAMENT_STARTED: &str = "tournament_started";
pub const ATTEMPT_SETTLED: &str = "attempt_settled";
pub const TOURNAMENT_COMPLETED: &str = "tournament_completed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentEvent {
    pub ts: String,
    pub tournament: String,
    pub seq: u64,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
}

impl TournamentEvent {
    pub fn with_now(
        tournament: impl Into<String>,
        seq: u64,
        event_type: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            ts: now_rfc3339(),
            tournament: tournament.into(),
            seq,
            event_type: event_type.into(),
            data,
        }
    }
}
