//! Merge rules: defaults, override order, conflict handling.
//!
//! Later layers win key by key: defaults, global file, workspace files, then
//! environment. Arrays such as `tournament.temperatures` are replaced whole.

use crate::tournament::{DEFAULT_TEMPERATURES, DEFAULT_THRESHOLD, DEFAULT_TIMEOUT_PER_ATTEMPT_MS};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    let temperatures: Vec<f64> = DEFAULT_TEMPERATURES.iter().map(|t| f64::from(*t)).collect();
    Config::builder()
        .set_default("tournament.temperatures", temperatures)?
        .set_default("tournament.threshold", DEFAULT_THRESHOLD)?
        .set_default(
            "tournament.timeout_per_attempt_ms",
            DEFAULT_TIMEOUT_PER_ATTEMPT_MS,
        )?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
