//! End-to-end tournament scenarios against scripted generators.

use crate::integration::test_utils::{
    fenced, padded_plan, rich_plan, venture_brief, FixtureScorer, Reply, ScriptedGenerator,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tourney::telemetry::MemoryEventSink;
use tourney::tournament::{FailureKind, FallbackReason, Tournament, TournamentOptions};
use tourney::TourneyError;

const SYSTEM: &str = "You are a go-to-market strategist. Answer with JSON only.";
const USER: &str = "Draft a launch plan.";

fn fixture_tournament(generator: Arc<ScriptedGenerator>) -> Tournament {
    Tournament::new(generator).with_scorer(Arc::new(FixtureScorer))
}

fn options(temperatures: &[f32]) -> TournamentOptions {
    TournamentOptions::default().with_temperatures(temperatures.to_vec())
}

#[tokio::test]
async fn highest_score_wins() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::scored(72)),
        (0.7, Reply::scored(85)),
        (1.0, Reply::scored(68)),
    ]));
    let run = fixture_tournament(generator)
        .run(SYSTEM, USER, &json!({}), &options(&[0.3, 0.7, 1.0]))
        .await
        .unwrap();

    let outcome = &run.outcome;
    assert!(!outcome.fallback());
    assert_eq!(outcome.winner_index(), Some(1));
    assert_eq!(run.result, Some(json!({"score": 85})));
    assert_eq!(outcome.generations().len(), 3);
    let totals: Vec<u8> = outcome
        .generations()
        .iter()
        .map(|a| a.score().unwrap().total())
        .collect();
    assert_eq!(totals, vec![72, 85, 68]);
}

#[tokio::test(start_paused = true)]
async fn timed_out_attempt_is_recorded_and_survivors_fall_below_threshold() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::scored(55)),
        (0.7, Reply::Hang),
        (1.0, Reply::scored(40)),
    ]));
    let opts = options(&[0.3, 0.7, 1.0]).with_timeout_ms(1000);
    let run = fixture_tournament(generator)
        .run(SYSTEM, USER, &json!({}), &opts)
        .await
        .unwrap();

    let outcome = &run.outcome;
    assert!(run.result.is_none());
    assert!(outcome.fallback());
    assert_eq!(outcome.fallback_reason(), Some(FallbackReason::BelowThreshold));
    assert_eq!(outcome.winner_index(), None);
    assert_eq!(outcome.generations().len(), 3);
    assert_eq!(outcome.best_score(), Some(55));

    let timed_out = &outcome.generations()[1];
    assert!(!timed_out.is_success());
    assert_eq!(timed_out.failure_kind(), Some(FailureKind::Timeout));
    assert!(timed_out.failure_reason().unwrap().contains("1000ms"));
    assert!(timed_out.duration_ms() >= 1000);
    assert!(timed_out.score().is_none());
}

#[tokio::test]
async fn single_attempt_just_above_threshold_wins() {
    let generator = Arc::new(ScriptedGenerator::new(vec![(0.7, Reply::scored(61))]));
    let run = fixture_tournament(generator)
        .run(SYSTEM, USER, &json!({}), &options(&[0.7]))
        .await
        .unwrap();
    assert_eq!(run.outcome.winner_index(), Some(0));
    assert_eq!(run.result, Some(json!({"score": 61})));
}

#[tokio::test]
async fn every_failure_kind_falls_back_with_all_attempts_failed() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::Error("connection refused".to_string())),
        (0.7, Reply::Text("I cannot help with that.".to_string())),
        (1.0, Reply::Panic),
    ]));
    let run = fixture_tournament(generator)
        .run(SYSTEM, USER, &json!({}), &options(&[0.3, 0.7, 1.0]))
        .await
        .unwrap();

    let outcome = &run.outcome;
    assert!(run.result.is_none());
    assert_eq!(
        outcome.fallback_reason(),
        Some(FallbackReason::AllAttemptsFailed)
    );
    assert_eq!(outcome.failure_count(), 3);
    assert_eq!(outcome.best_score(), None);
    let kinds: Vec<Option<FailureKind>> =
        outcome.generations().iter().map(|a| a.failure_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            Some(FailureKind::Provider),
            Some(FailureKind::Parse),
            Some(FailureKind::Panicked)
        ]
    );
    assert!(outcome.generations()[0]
        .failure_reason()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test(start_paused = true)]
async fn ties_go_to_the_earliest_requested_attempt() {
    // Index 0 settles last; completion order must not matter.
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::scored_after(80, 300)),
        (0.7, Reply::scored_after(80, 10)),
        (1.0, Reply::scored_after(70, 0)),
    ]));
    let run = fixture_tournament(generator)
        .run(SYSTEM, USER, &json!({}), &options(&[0.3, 0.7, 1.0]))
        .await
        .unwrap();
    assert_eq!(run.outcome.winner_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn attempts_run_concurrently() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::scored_after(70, 1000)),
        (0.7, Reply::scored_after(75, 1000)),
        (1.0, Reply::scored_after(80, 1000)),
    ]));
    let run = fixture_tournament(generator)
        .run(SYSTEM, USER, &json!({}), &options(&[0.3, 0.7, 1.0]))
        .await
        .unwrap();

    let outcome = &run.outcome;
    assert_eq!(outcome.success_count(), 3);
    assert!(outcome.total_duration_ms() >= 1000);
    assert!(
        outcome.total_duration_ms() < 1500,
        "three 1s attempts took {}ms",
        outcome.total_duration_ms()
    );
}

#[tokio::test]
async fn panicking_attempt_does_not_take_down_its_siblings() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::Panic),
        (0.7, Reply::scored(90)),
    ]));
    let run = fixture_tournament(generator)
        .run(SYSTEM, USER, &json!({}), &options(&[0.3, 0.7]))
        .await
        .unwrap();
    assert_eq!(run.outcome.winner_index(), Some(1));
    assert_eq!(
        run.outcome.generations()[0].failure_kind(),
        Some(FailureKind::Panicked)
    );
}

#[tokio::test]
async fn empty_temperature_list_is_rejected_before_any_request() {
    let generator = Arc::new(ScriptedGenerator::new(vec![]));
    let err = fixture_tournament(generator.clone())
        .run(SYSTEM, USER, &json!({}), &options(&[]))
        .await
        .unwrap_err();
    assert!(matches!(err, TourneyError::ConfigError(_)));
    assert!(generator.called_temperatures().is_empty());
}

#[tokio::test]
async fn generator_is_called_once_per_temperature() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.2, Reply::scored(10)),
        (0.9, Reply::scored(20)),
    ]));
    fixture_tournament(generator.clone())
        .run(SYSTEM, USER, &json!({}), &options(&[0.2, 0.9]))
        .await
        .unwrap();
    let mut called = generator.called_temperatures();
    called.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(called, vec![0.2, 0.9]);
}

#[tokio::test]
async fn built_in_rubric_prefers_the_concrete_plan() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::Text(fenced(&padded_plan()))),
        (0.7, Reply::Text(fenced(&rich_plan()))),
    ]));
    let run = Tournament::new(generator)
        .run(SYSTEM, USER, &venture_brief(), &options(&[0.3, 0.7]))
        .await
        .unwrap();

    let outcome = &run.outcome;
    assert_eq!(outcome.winner_index(), Some(1));
    assert_eq!(outcome.winner().unwrap().score().unwrap().total(), 94);
    assert_eq!(outcome.generations()[0].score().unwrap().total(), 7);
    assert_eq!(run.result, Some(rich_plan()));
}

#[tokio::test]
async fn outcome_serializes_as_an_audit_trail() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::scored(30)),
        (0.7, Reply::Error("boom".to_string())),
    ]));
    let run = fixture_tournament(generator)
        .run(SYSTEM, USER, &json!({}), &options(&[0.3, 0.7]))
        .await
        .unwrap();

    let value: Value = serde_json::to_value(&run).unwrap();
    assert_eq!(value["result"], Value::Null);
    assert_eq!(value["outcome"]["fallback"], true);
    assert_eq!(value["outcome"]["fallback_reason"], "below_threshold");
    assert_eq!(value["outcome"]["winner_index"], Value::Null);
    let generations = value["outcome"]["generations"].as_array().unwrap();
    assert_eq!(generations.len(), 2);
    assert_eq!(generations[0]["status"], "success");
    assert_eq!(generations[0]["score"]["total"], 30);
    assert_eq!(generations[1]["status"], "failure");
    assert!(generations[1]["content"].is_null());
    assert_eq!(generations[1]["failure_kind"], "provider");
}

#[tokio::test]
async fn events_bracket_the_settled_attempts() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        (0.3, Reply::scored(70)),
        (0.7, Reply::scored(75)),
    ]));
    let sink = Arc::new(MemoryEventSink::new());
    fixture_tournament(generator)
        .with_event_sink(sink.clone())
        .run(SYSTEM, USER, &json!({}), &options(&[0.3, 0.7]))
        .await
        .unwrap();

    assert_eq!(
        sink.event_types(),
        vec![
            "tournament_started",
            "attempt_settled",
            "attempt_settled",
            "tournament_completed"
        ]
    );
    let events = sink.events();
    assert!(events.iter().all(|e| e.tournament == events[0].tournament));
    assert_eq!(events[3].data["winner_index"], 1);
}
