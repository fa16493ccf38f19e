//! Tournament Coordinator
//!
//! Fans out one generation attempt per requested temperature, waits for every
//! attempt to settle, scores the successes and picks the best one. If nothing
//! succeeded, or the best composite is below the threshold, the caller gets no
//! result and falls back to its own deterministic path.
//!
//! Attempt failures are recorded in the outcome, never returned as errors.
//! [`Tournament::run`] only fails on invalid options.

mod attempt;
mod outcome;
mod runner;
pub mod selection;

pub use attempt::{Attempt, AttemptFailure, AttemptStatus, FailureKind};
pub use outcome::{FallbackReason, TournamentOutcome, TournamentRun};
pub use runner::{AttemptRunner, AttemptSettlement, ContentGenerator, GenerationOptions};

use crate::error::TourneyError;
use crate::parser::{JsonResponseParser, ResponseParser};
use crate::scoring::{Rubric, Scorer, COMPOSITE_MAX};
use crate::telemetry::{
    new_tournament_id, EventSink, TournamentEvent, ATTEMPT_SETTLED, TOURNAMENT_COMPLETED,
    TOURNAMENT_STARTED,
};
use futures::stream::{FuturesUnordered, StreamExt};
use runner::elapsed_ms;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_TEMPERATURES: [f32; 3] = [0.3, 0.7, 1.0];
pub const DEFAULT_THRESHOLD: f64 = 60.0;
pub const DEFAULT_TIMEOUT_PER_ATTEMPT_MS: u64 = 30_000;

const MAX_TEMPERATURE: f32 = 2.0;

/// Caller-overridable tournament settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentOptions {
    /// One attempt per entry, in this order. A lone number means one attempt.
    #[serde(deserialize_with = "one_or_many")]
    pub temperatures: Vec<f32>,
    /// Minimum composite a winner needs; compared as `best < threshold`.
    pub threshold: f64,
    /// Bound on each outbound generation call.
    pub timeout_per_attempt_ms: u64,
}

/// Accepts a list, a lone number, or a comma-separated string. Environment
/// overrides arrive as a number when they hold a single value.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Temperatures;

    impl<'de> serde::de::Visitor<'de> for Temperatures {
        type Value = Vec<f32>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a temperature or a list of temperatures")
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(vec![v as f32])
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(vec![v as f32])
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(vec![v as f32])
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| {
                    t.parse::<f32>()
                        .map_err(|e| E::custom(format!("invalid temperature '{}': {}", t, e)))
                })
                .collect()
        }

        fn visit_seq<A: serde::de::SeqAccess<'de>>(
            self,
            mut seq: A,
        ) -> Result<Self::Value, A::Error> {
            let mut temperatures = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(t) = seq.next_element::<f32>()? {
                temperatures.push(t);
            }
            Ok(temperatures)
        }
    }

    deserializer.deserialize_any(Temperatures)
}

impl Default for TournamentOptions {
    fn default() -> Self {
        Self {
            temperatures: DEFAULT_TEMPERATURES.to_vec(),
            threshold: DEFAULT_THRESHOLD,
            timeout_per_attempt_ms: DEFAULT_TIMEOUT_PER_ATTEMPT_MS,
        }
    }
}

impl TournamentOptions {
    pub fn with_temperatures(mut self, temperatures: impl Into<Vec<f32>>) -> Self {
        self.temperatures = temperatures.into();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_per_attempt_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_per_attempt_ms)
    }

    /// Every problem with these options, empty when they are usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.temperatures.is_empty() {
            problems.push("temperatures must contain at least one value".to_string());
        }
        for (index, t) in self.temperatures.iter().enumerate() {
            if !t.is_finite() || *t < 0.0 || *t > MAX_TEMPERATURE {
                problems.push(format!(
                    "temperatures[{index}] = {t} is outside [0, {MAX_TEMPERATURE}]"
                ));
            }
        }
        if !self.threshold.is_finite()
            || self.threshold < 0.0
            || self.threshold > f64::from(COMPOSITE_MAX)
        {
            problems.push(format!(
                "threshold {} is outside [0, {COMPOSITE_MAX}]",
                self.threshold
            ));
        }
        if self.timeout_per_attempt_ms == 0 {
            problems.push("timeout_per_attempt_ms must be greater than zero".to_string());
        }
        problems
    }

    pub fn validate(&self) -> Result<(), TourneyError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(TourneyError::ConfigError(problems.join("; ")))
        }
    }
}

/// Runs competitive multi-generation tournaments.
pub struct Tournament {
    generator: Arc<dyn ContentGenerator>,
    parser: Arc<dyn ResponseParser>,
    scorer: Arc<dyn Scorer>,
    events: Option<Arc<dyn EventSink>>,
}

impl Tournament {
    /// A tournament with the JSON response parser and the built-in rubric.
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            generator,
            parser: Arc::new(JsonResponseParser),
            scorer: Arc::new(Rubric::default()),
            events: None,
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn ResponseParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }

    pub async fn run(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        context: &Value,
        options: &TournamentOptions,
    ) -> Result<TournamentRun, TourneyError> {
        options.validate()?;

        let started = Instant::now();
        let mut emission = Emission::new(self.events.as_deref());
        let attempts = options.temperatures.len();
        info!(
            tournament = %emission.tournament,
            attempts,
            threshold = options.threshold,
            timeout_ms = options.timeout_per_attempt_ms,
            "Tournament started"
        );
        emission.emit(
            TOURNAMENT_STARTED,
            json!({
                "temperatures": options.temperatures,
                "threshold": options.threshold,
                "timeout_per_attempt_ms": options.timeout_per_attempt_ms,
            }),
        );

        let settlements = self.settle_all(system_prompt, user_prompt, options).await;

        let mut generations = Vec::with_capacity(attempts);
        for (index, (&temperature, settlement)) in
            options.temperatures.iter().zip(settlements).enumerate()
        {
            let attempt = match settlement {
                Some(settlement) => Attempt::settled(index, temperature, settlement),
                None => Attempt::failed(
                    index,
                    temperature,
                    AttemptFailure::new(FailureKind::Panicked, "Attempt did not report a result"),
                    0,
                ),
            };
            let attempt = match attempt.content() {
                Some(content) => {
                    let score = self.scorer.score(content, context);
                    attempt.with_score(score)
                }
                None => attempt,
            };
            log_settled(&emission.tournament, &attempt);
            emission.emit(ATTEMPT_SETTLED, settled_payload(&attempt));
            generations.push(attempt);
        }

        let total_duration_ms = elapsed_ms(started);
        let best = selection::select(&generations)
            .and_then(|a| a.score().map(|score| (a.index(), score.total())));
        let outcome = match best {
            None => TournamentOutcome::fell_back(
                generations,
                FallbackReason::AllAttemptsFailed,
                options.threshold,
                total_duration_ms,
            ),
            Some((_, total)) if f64::from(total) < options.threshold => {
                TournamentOutcome::fell_back(
                    generations,
                    FallbackReason::BelowThreshold,
                    options.threshold,
                    total_duration_ms,
                )
            }
            Some((index, _)) => TournamentOutcome::won(
                generations,
                index,
                options.threshold,
                total_duration_ms,
            ),
        };

        match outcome.fallback_reason() {
            Some(reason) => warn!(
                tournament = %emission.tournament,
                reason = reason.as_str(),
                best_score = ?outcome.best_score(),
                successes = outcome.success_count(),
                duration_ms = total_duration_ms,
                "Tournament fell back"
            ),
            None => info!(
                tournament = %emission.tournament,
                winner_index = ?outcome.winner_index(),
                best_score = ?outcome.best_score(),
                successes = outcome.success_count(),
                duration_ms = total_duration_ms,
                "Tournament completed"
            ),
        }
        emission.emit(
            TOURNAMENT_COMPLETED,
            json!({
                "winner_index": outcome.winner_index(),
                "fallback": outcome.fallback(),
                "fallback_reason": outcome.fallback_reason().map(FallbackReason::as_str),
                "best_score": outcome.best_score(),
                "threshold": outcome.threshold(),
                "success_count": outcome.success_count(),
                "failure_count": outcome.failure_count(),
                "total_duration_ms": total_duration_ms,
            }),
        );

        let result = outcome.winner().and_then(Attempt::content).cloned();
        Ok(TournamentRun { result, outcome })
    }

    /// Runs every attempt concurrently and waits for all of them. Each
    /// settlement lands in the slot of its request index.
    async fn settle_all(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &TournamentOptions,
    ) -> Vec<Option<AttemptSettlement>> {
        let runner = AttemptRunner::new(Arc::clone(&self.generator), Arc::clone(&self.parser));
        let timeout = options.timeout();
        let mut slots: Vec<Option<AttemptSettlement>> = vec![None; options.temperatures.len()];

        let mut pending = FuturesUnordered::new();
        for (index, &temperature) in options.temperatures.iter().enumerate() {
            let runner = &runner;
            pending.push(async move {
                let settlement = runner
                    .run(system_prompt, user_prompt, temperature, timeout)
                    .await;
                (index, settlement)
            });
        }
        while let Some((index, settlement)) = pending.next().await {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(settlement);
            }
        }
        slots
    }
}

/// Best-effort event emission with a per-tournament sequence number.
struct Emission<'a> {
    sink: Option<&'a dyn EventSink>,
    tournament: String,
    seq: u64,
}

impl<'a> Emission<'a> {
    fn new(sink: Option<&'a dyn EventSink>) -> Self {
        Self {
            sink,
            tournament: new_tournament_id(),
            seq: 0,
        }
    }

    fn emit(&mut self, event_type: &str, data: Value) {
        if let Some(sink) = self.sink {
            sink.emit(TournamentEvent::with_now(
                self.tournament.clone(),
                self.seq,
                event_type,
                data,
            ));
            self.seq += 1;
        }
    }
}

fn settled_payload(attempt: &Attempt) -> Value {
    json!({
        "index": attempt.index(),
        "temperature": attempt.temperature(),
        "status": attempt.status(),
        "duration_ms": attempt.duration_ms(),
        "score": attempt.score().map(|s| s.total()),
        "failure_kind": attempt.failure_kind(),
        "failure_reason": attempt.failure_reason(),
        "content_digest": attempt.content_digest(),
    })
}

fn log_settled(tournament: &str, attempt: &Attempt) {
    match attempt.failure_reason() {
        None => debug!(
            tournament = %tournament,
            index = attempt.index(),
            temperature = attempt.temperature(),
            score = ?attempt.score().map(|s| s.total()),
            duration_ms = attempt.duration_ms(),
            "Attempt succeeded"
        ),
        Some(reason) => warn!(
            tournament = %tournament,
            index = attempt.index(),
            temperature = attempt.temperature(),
            kind = ?attempt.failure_kind().map(FailureKind::as_str),
            error = %reason,
            duration_ms = attempt.duration_ms(),
            "Attempt failed"
        ),
    }
}
