//! Presentation: text tables and JSON for tournament runs, scores and config.

use crate::config::TourneyConfig;
use crate::error::TourneyError;
use crate::scoring::{CompositeScore, DimensionKind};
use crate::tournament::{Attempt, TournamentRun};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;
use serde_json::json;

fn to_json<T: Serialize>(value: &T) -> Result<String, TourneyError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| TourneyError::ConfigError(format!("Failed to render JSON: {}", e)))
}

pub fn format_run(run: &TournamentRun, format: &str) -> Result<String, TourneyError> {
    if format == "json" {
        return to_json(run);
    }

    let outcome = &run.outcome;
    let mut out = match (outcome.winner(), outcome.fallback_reason()) {
        (Some(winner), _) => format!(
            "Winner: attempt {} (temperature {}, score {})",
            winner.index(),
            winner.temperature(),
            winner.score().map(|s| s.total()).unwrap_or(0)
        ),
        (None, Some(reason)) => match outcome.best_score() {
            Some(best) => format!(
                "Fallback: {} (best score {} < threshold {})",
                reason.as_str(),
                best,
                outcome.threshold()
            ),
            None => format!("Fallback: {}", reason.as_str()),
        },
        (None, None) => "No result".to_string(),
    };
    out.push_str(&format!(
        "\nAttempts: {} succeeded, {} failed in {} ms\n",
        outcome.success_count(),
        outcome.failure_count(),
        outcome.total_duration_ms()
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "#",
        "Temp",
        "Status",
        "Score",
        "Spec",
        "Act",
        "Align",
        "Cons",
        "Duration",
        "Detail",
    ]);
    for attempt in outcome.generations() {
        table.add_row(attempt_row(attempt, outcome.winner_index()));
    }
    out.push_str(&table.to_string());

    if let Some(content) = &run.result {
        out.push_str("\n\n");
        out.push_str(&to_json(content)?);
    }
    Ok(out)
}

fn attempt_row(attempt: &Attempt, winner_index: Option<usize>) -> Vec<String> {
    let marker = if winner_index == Some(attempt.index()) {
        format!("{}*", attempt.index())
    } else {
        attempt.index().to_string()
    };
    let dims = |kind: DimensionKind| {
        attempt
            .score()
            .map(|s| s.get(kind).to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let detail = match (attempt.failure_kind(), attempt.failure_reason()) {
        (Some(kind), Some(reason)) => format!("{}: {}", kind.as_str(), reason),
        _ => attempt
            .content_digest()
            .map(|d| d.chars().take(12).collect())
            .unwrap_or_default(),
    };
    vec![
        marker,
        attempt.temperature().to_string(),
        if attempt.is_success() { "success" } else { "failure" }.to_string(),
        attempt
            .score()
            .map(|s| s.total().to_string())
            .unwrap_or_else(|| "-".to_string()),
        dims(DimensionKind::Specificity),
        dims(DimensionKind::Actionability),
        dims(DimensionKind::Alignment),
        dims(DimensionKind::InternalConsistency),
        format!("{} ms", attempt.duration_ms()),
        detail,
    ]
}

pub fn format_score(score: &CompositeScore, format: &str) -> Result<String, TourneyError> {
    if format == "json" {
        let dimensions: serde_json::Map<String, serde_json::Value> = score
            .dimensions()
            .iter()
            .map(|d| (d.kind.as_str().to_string(), json!(d.points)))
            .collect();
        return to_json(&json!({ "total": score.total(), "dimensions": dimensions }));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Dimension", "Points"]);
    for d in score.dimensions() {
        table.add_row(vec![d.kind.as_str().to_string(), format!("{} / 25", d.points)]);
    }
    table.add_row(vec!["total".to_string(), format!("{} / 100", score.total())]);
    Ok(table.to_string())
}

pub fn format_config(config: &TourneyConfig, format: &str) -> Result<String, TourneyError> {
    if format == "json" {
        return to_json(config);
    }

    let temperatures: Vec<String> = config
        .tournament
        .temperatures
        .iter()
        .map(|t| t.to_string())
        .collect();
    let mut rows = vec![
        ("tournament.temperatures", temperatures.join(", ")),
        ("tournament.threshold", config.tournament.threshold.to_string()),
        (
            "tournament.timeout_per_attempt_ms",
            config.tournament.timeout_per_attempt_ms.to_string(),
        ),
    ];
    match &config.provider {
        Some(provider) => {
            rows.push(("provider.type", format!("{:?}", provider.provider_type)));
            rows.push(("provider.model", provider.model.clone()));
            if let Some(endpoint) = &provider.endpoint {
                rows.push(("provider.endpoint", endpoint.clone()));
            }
        }
        None => rows.push(("provider", "(not configured)".to_string())),
    }
    rows.push(("logging.level", config.logging.level.clone()));
    rows.push(("logging.format", config.logging.format.clone()));
    rows.push(("logging.output", config.logging.output.clone()));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Key", "Value"]);
    for (key, value) in rows {
        table.add_row(vec![key.to_string(), value]);
    }
    Ok(table.to_string())
}
