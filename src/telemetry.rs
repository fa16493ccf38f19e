//! Telemetry: tournament lifecycle events and where they go.

mod types;

pub mod events;
pub mod sinks;

pub use events::{TournamentEvent, ATTEMPT_SETTLED, TOURNAMENT_COMPLETED, TOURNAMENT_STARTED};
pub use sinks::{EventSink, MemoryEventSink, TracingEventSink};
pub use types::{new_tournament_id, now_rfc3339};
