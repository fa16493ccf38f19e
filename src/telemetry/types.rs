//! Shared telemetry helpers: timestamps and tournament id generation.

use chrono::{SecondsFormat, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

static TOURNAMENT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Current time as an RFC 3339 UTC timestamp with millisecond precision.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate a process-unique tournament id.
pub fn new_tournament_id() -> String {
    let ts = Utc::now().timestamp_millis();
    let pid = std::process::id();
    let seq = TOURNAMENT_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("tour-{ts}-{pid}-{seq}")
}
