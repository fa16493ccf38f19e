//! Configuration files feeding the CLI run context.

use std::path::PathBuf;
use tempfile::TempDir;
use tourney::cli::{Commands, RunContext};
use tourney::config::ConfigLoader;
use tourney::provider::{ProviderGenerator, ProviderType};

const CONFIG: &str = r#"
[tournament]
temperatures = [0.2, 0.8]
threshold = 70.0
timeout_per_attempt_ms = 5000

[provider]
provider_type = "ollama"
model = "llama3"
endpoint = "http://localhost:11434"

[logging]
level = "debug"
"#;

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("tourney.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn explicit_file_configures_tournament_and_provider() {
    let temp = TempDir::new().unwrap();
    let config = ConfigLoader::load_from_file(&write_config(&temp, CONFIG)).unwrap();

    assert_eq!(config.tournament.temperatures, vec![0.2, 0.8]);
    assert_eq!(config.tournament.threshold, 70.0);
    assert_eq!(config.tournament.timeout_per_attempt_ms, 5000);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.output, "stderr");

    let provider = config.provider.as_ref().unwrap();
    assert_eq!(provider.provider_type, ProviderType::Ollama);
    let generator = ProviderGenerator::from_config(provider).unwrap();
    assert_eq!(generator.model_name(), "llama3");
}

#[test]
fn workspace_file_is_picked_up() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("config");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[tournament]\nthreshold = 42.0\n").unwrap();

    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(config.tournament.threshold, 42.0);
    assert_eq!(config.tournament.temperatures, vec![0.3, 0.7, 1.0]);
}

#[test]
fn run_context_reports_effective_config_as_json() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, CONFIG);
    let ctx = RunContext::new(temp.path().to_path_buf(), Some(path)).unwrap();

    let out = ctx
        .execute(&Commands::Config {
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["tournament"]["threshold"], 70.0);
    assert_eq!(value["provider"]["provider_type"], "ollama");
    assert_eq!(value["provider"]["model"], "llama3");
}

#[test]
fn invalid_file_values_fail_validation() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[tournament]\ntemperatures = [3.5]\n");
    let err = RunContext::new(temp.path().to_path_buf(), Some(path))
        .err()
        .unwrap();
    assert!(err.to_string().contains("Tournament"));
}

#[test]
fn score_command_scores_a_plan_file() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("plan.json");
    let context = temp.path().join("brief.json");
    std::fs::write(
        &content,
        crate::integration::test_utils::rich_plan().to_string(),
    )
    .unwrap();
    std::fs::write(
        &context,
        crate::integration::test_utils::venture_brief().to_string(),
    )
    .unwrap();

    let ctx = RunContext::new(temp.path().to_path_buf(), Some(write_config(&temp, CONFIG))).unwrap();
    let out = ctx
        .execute(&Commands::Score {
            content,
            context: Some(context),
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["total"], 94);
}
