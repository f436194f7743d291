use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionPhase;

/// Every host-level state change produces an Event.
/// The CLI prints them; UI hosts react to them (haptics, celebration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerCreated {
        duration_secs: u64,
        /// A previous session was discarded to make room for this one.
        replaced_active: bool,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: f64,
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    TimerExtended {
        added_secs: u64,
        duration_secs: u64,
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        elapsed_secs: f64,
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    /// A running session reached zero.
    TimerCompleted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: SessionPhase,
        duration_secs: u64,
        elapsed_secs: f64,
        remaining_secs: f64,
        progress: f64,
        at: DateTime<Utc>,
    },
}

/// Epoch milliseconds as a UTC timestamp. Out-of-range values map to the epoch.
pub fn timestamp(epoch_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(epoch_ms).unwrap_or_default()
}
