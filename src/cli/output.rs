//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::TourneyError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &TourneyError) -> String {
    match e {
        TourneyError::ProviderNotConfigured(_) => format!(
            "{}\nAdd a [provider] section to config/config.toml or ~/.config/tourney/config.toml.",
            e
        ),
        _ => e.to_string(),
    }
}
