//! Configuration System
//!
//! Layered configuration for tournaments, the model provider and logging.
//! Layers, lowest to highest: built-in defaults, the global file, workspace
//! files, then `TOURNEY__*` environment variables.

use crate::logging::LoggingConfig;
use crate::tournament::TournamentOptions;
use serde::{Deserialize, Serialize};

pub use crate::provider::{ProviderConfig, ProviderType};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Serializes tests that touch HOME, XDG_CONFIG_HOME or TOURNEY__* variables.
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourneyConfig {
    /// Tournament defaults; CLI flags override them per run.
    #[serde(default)]
    pub tournament: TournamentOptions,

    /// Model provider used by `tourney run`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Tournament(String),
    Provider(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Tournament(msg) => write!(f, "Tournament: {}", msg),
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TourneyConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors: Vec<ValidationError> = self
            .tournament
            .problems()
            .into_iter()
            .map(ValidationError::Tournament)
            .collect();

        if let Some(provider) = &self.provider {
            if let Err(e) = provider.validate() {
                errors.push(ValidationError::Provider(e));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
