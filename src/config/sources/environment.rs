//! Environment source: TOURNEY__SECTION__KEY, e.g. TOURNEY__TOURNAMENT__THRESHOLD=75.
//!
//! `TOURNEY__TOURNAMENT__TEMPERATURES` takes a comma-separated list.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const PREFIX: &str = "TOURNEY";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("tournament.temperatures"),
    )
}
