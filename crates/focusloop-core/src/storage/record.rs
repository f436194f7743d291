//! Persisted session record.
//!
//! The record is the camelCase JSON form of [`TimerSession`]:
//!
//! ```text
//! { "durationSeconds": 1500, "anchorStartedAtMs": 1700000000000,
//!   "accumulatedRunSeconds": 60.0, "isRunning": true, "createdAtMs": 1700000000000 }
//! ```
//!
//! "No record" stands for Absent. Decoding accepts records written by older
//! and newer versions: unknown fields are ignored and a missing `createdAtMs`
//! falls back to the anchor.

use serde::Deserialize;
use tracing::warn;

use crate::error::RecordError;
use crate::timer::TimerSession;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    duration_seconds: u64,
    anchor_started_at_ms: i64,
    #[serde(default)]
    accumulated_run_seconds: f64,
    is_running: bool,
    #[serde(default)]
    created_at_ms: Option<i64>,
}

/// Encode a session; `None` encodes to "no record".
pub fn encode(session: Option<&TimerSession>) -> Result<Option<String>, serde_json::Error> {
    session.map(serde_json::to_string).transpose()
}

/// Decode and validate a stored record.
///
/// Records that would break a session invariant are rejected, except for
/// counted time past the planned duration, which is clamped.
pub fn decode(raw: &str) -> Result<TimerSession, RecordError> {
    let stored: StoredSession = serde_json::from_str(raw)?;

    if stored.duration_seconds == 0 {
        return Err(RecordError::InvalidField {
            field: "durationSeconds",
            message: "must be greater than zero".into(),
        });
    }
    if !stored.accumulated_run_seconds.is_finite() || stored.accumulated_run_seconds < 0.0 {
        return Err(RecordError::InvalidField {
            field: "accumulatedRunSeconds",
            message: format!("must be a non-negative number, got {}", stored.accumulated_run_seconds),
        });
    }

    let duration = stored.duration_seconds as f64;
    let accumulated_run_seconds = if stored.accumulated_run_seconds > duration {
        warn!(
            accumulated = stored.accumulated_run_seconds,
            duration, "clamping counted time in focus session record"
        );
        duration
    } else {
        stored.accumulated_run_seconds
    };

    Ok(TimerSession {
        duration_seconds: stored.duration_seconds,
        anchor_started_at_ms: stored.anchor_started_at_ms,
        accumulated_run_seconds,
        is_running: stored.is_running,
        created_at_ms: stored.created_at_ms.unwrap_or(stored.anchor_started_at_ms),
    })
}
