//! CLI parse: clap types for Tourney. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tourney CLI - competitive multi-generation selection
#[derive(Parser)]
#[command(name = "tourney")]
#[command(about = "Generate several candidates concurrently and keep the best-scoring one")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a live tournament against the configured provider
    Run {
        /// File containing the system prompt
        #[arg(long)]
        system: PathBuf,
        /// File containing the user prompt
        #[arg(long)]
        user: PathBuf,
        /// JSON file with the context used for alignment scoring
        #[arg(long)]
        context: Option<PathBuf>,
        /// Attempt temperature; repeat for several attempts (overrides config)
        #[arg(long = "temperature")]
        temperatures: Vec<f32>,
        /// Minimum composite score for a winner (overrides config)
        #[arg(long)]
        threshold: Option<f64>,
        /// Per-attempt timeout in milliseconds (overrides config)
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Score a payload offline with the built-in rubric
    Score {
        /// File with the payload (JSON, optionally fenced)
        #[arg(long)]
        content: PathBuf,
        /// JSON file with the context used for alignment scoring
        #[arg(long)]
        context: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show effective configuration
    Config {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Run { .. } => "run",
            Commands::Score { .. } => "score",
            Commands::Config { .. } => "config",
        }
    }
}
