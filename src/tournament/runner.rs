//! Generation Attempt Runner: one bounded-time generate + parse call.

use super::attempt::{AttemptFailure, FailureKind};
use crate::error::TourneyError;
use crate::parser::ResponseParser;
use async_trait::async_trait;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Per-call generation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
}

/// External content generator (an LLM behind some transport).
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, TourneyError>;
}

/// What a settled attempt reports back to the coordinator.
#[derive(Debug, Clone)]
pub struct AttemptSettlement {
    pub duration_ms: u64,
    pub outcome: Result<Value, AttemptFailure>,
}

#[derive(Clone)]
pub struct AttemptRunner {
    generator: Arc<dyn ContentGenerator>,
    parser: Arc<dyn ResponseParser>,
}

impl AttemptRunner {
    pub fn new(generator: Arc<dyn ContentGenerator>, parser: Arc<dyn ResponseParser>) -> Self {
        Self { generator, parser }
    }

    /// Runs one attempt. Never fails and never unwinds: errors, timeouts and
    /// panics inside the generator or parser all come back as a failure.
    ///
    /// `timeout` bounds only the outbound generation call; parsing happens
    /// after the response arrived.
    pub async fn run(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        timeout: Duration,
    ) -> AttemptSettlement {
        let started = Instant::now();
        let attempt = self.generate(system_prompt, user_prompt, temperature, timeout);
        let outcome = match AssertUnwindSafe(attempt).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => Err(AttemptFailure::new(
                FailureKind::Panicked,
                format!("Attempt panicked: {}", panic_message(panic.as_ref())),
            )),
        };
        AttemptSettlement {
            duration_ms: elapsed_ms(started),
            outcome,
        }
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Value, AttemptFailure> {
        let call = self
            .generator
            .complete(system_prompt, user_prompt, GenerationOptions { temperature });
        let raw = match tokio::time::timeout(timeout, call).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => return Err(AttemptFailure::from(&err)),
            Err(_) => {
                let err = TourneyError::Timeout {
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                };
                return Err(AttemptFailure::from(&err));
            }
        };
        self.parser
            .parse(&raw)
            .map_err(|err| AttemptFailure::from(&err))
    }
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic payload"
    }
}
