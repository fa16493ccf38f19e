//! Error types for the tournament engine.
//!
//! Attempt-level failures are recorded as data on the outcome; only configuration
//! problems surface from [`crate::tournament::Tournament::run`] as an `Err`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TourneyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Generation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("{0}")]
    ParseFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for TourneyError {
    fn from(err: config::ConfigError) -> Self {
        TourneyError::ConfigError(err.to_string())
    }
}
