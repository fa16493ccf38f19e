//! Tourney: Competitive Multi-Generation Selection
//!
//! Runs several generation attempts for the same prompt concurrently at
//! different temperatures, scores every successful attempt against a fixed
//! four-dimension rubric and keeps the best one. When nothing clears the
//! quality threshold the caller gets no result and an audit trail explaining
//! why.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod provider;
pub mod scoring;
pub mod telemetry;
pub mod tournament;

pub use error::TourneyError;
pub use scoring::{score, CompositeScore, Rubric, Scorer};
pub use tournament::{
    ContentGenerator, GenerationOptions, Tournament, TournamentOptions, TournamentOutcome,
    TournamentRun,
};
