//! Event sinks. Emission is best-effort: sinks cannot fail a tournament.

use super::events::TournamentEvent;
use parking_lot::Mutex;
use tracing::info;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: TournamentEvent);
}

/// Writes every event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: TournamentEvent) {
        info!(
            target: "tourney::events",
            tournament = %event.tournament,
            seq = event.seq,
            event_type = %event.event_type,
            data = %event.data,
            "tournament event"
        );
    }
}

/// Keeps events in memory, for tests and for callers that render them later.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<TournamentEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TournamentEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: TournamentEvent) {
        self.events.lock().push(event);
    }
}
