//! CLI domain: parse, route, output, and presentation only.
//! No tournament logic here; the route table dispatches to the library.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_config, format_run, format_score};
pub use route::RunContext;
