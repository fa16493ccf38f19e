//! CLI route: single route table and run context. Dispatches to the library and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_config, format_run, format_score};
use crate::config::{ConfigLoader, TourneyConfig};
use crate::error::TourneyError;
use crate::parser::{JsonResponseParser, ResponseParser};
use crate::provider::ProviderGenerator;
use crate::scoring::{Rubric, Scorer};
use crate::telemetry::TracingEventSink;
use crate::tournament::{Tournament, TournamentOptions};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: workspace and effective configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: TourneyConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, TourneyError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::with_config(workspace_root, config)
    }

    /// Create run context from an already-loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: TourneyConfig) -> Result<Self, TourneyError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            TourneyError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &TourneyConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, TourneyError> {
        info!(command = command.name(), "Executing command");
        match command {
            Commands::Run {
                system,
                user,
                context,
                temperatures,
                threshold,
                timeout_ms,
                format,
            } => {
                let options = self.tournament_options(temperatures, *threshold, *timeout_ms);
                self.handle_run(system, user, context.as_deref(), &options, format)
            }
            Commands::Score {
                content,
                context,
                format,
            } => self.handle_score(content, context.as_deref(), format),
            Commands::Config { format } => format_config(&self.config, format),
        }
    }

    /// Configured tournament options with CLI overrides applied.
    pub fn tournament_options(
        &self,
        temperatures: &[f32],
        threshold: Option<f64>,
        timeout_ms: Option<u64>,
    ) -> TournamentOptions {
        let mut options = self.config.tournament.clone();
        if !temperatures.is_empty() {
            options.temperatures = temperatures.to_vec();
        }
        if let Some(threshold) = threshold {
            options.threshold = threshold;
        }
        if let Some(timeout_ms) = timeout_ms {
            options.timeout_per_attempt_ms = timeout_ms;
        }
        options
    }

    fn handle_run(
        &self,
        system: &Path,
        user: &Path,
        context: Option<&Path>,
        options: &TournamentOptions,
        format: &str,
    ) -> Result<String, TourneyError> {
        options.validate()?;
        let system_prompt = read_text(system)?;
        let user_prompt = read_text(user)?;
        let context = read_context(context)?;

        let provider = self.config.provider.as_ref().ok_or_else(|| {
            TourneyError::ProviderNotConfigured("no [provider] section in configuration".to_string())
        })?;
        let generator = ProviderGenerator::from_config(provider)?;
        info!(
            provider = generator.provider_name(),
            model = generator.model_name(),
            attempts = options.temperatures.len(),
            "Starting tournament"
        );
        let tournament =
            Tournament::new(Arc::new(generator)).with_event_sink(Arc::new(TracingEventSink));

        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(TourneyError::ProviderError(
                "Cannot run a tournament from within an async runtime context".to_string(),
            ));
        }
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| TourneyError::ProviderError(format!("Failed to create runtime: {}", e)))?;
        let run = rt.block_on(tournament.run(&system_prompt, &user_prompt, &context, options))?;

        format_run(&run, format)
    }

    fn handle_score(
        &self,
        content: &Path,
        context: Option<&Path>,
        format: &str,
    ) -> Result<String, TourneyError> {
        let payload = JsonResponseParser.parse(&read_text(content)?)?;
        let context = read_context(context)?;
        let score = Rubric::default().score(&payload, &context);
        format_score(&score, format)
    }
}

fn read_text(path: &Path) -> Result<String, TourneyError> {
    std::fs::read_to_string(path).map_err(|e| {
        TourneyError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Context file as JSON; an absent file means an empty object.
fn read_context(path: Option<&Path>) -> Result<Value, TourneyError> {
    match path {
        None => Ok(Value::Object(Default::default())),
        Some(path) => serde_json::from_str(&read_text(path)?).map_err(|e| {
            TourneyError::ConfigError(format!("Invalid context file {}: {}", path.display(), e))
        }),
    }
}
