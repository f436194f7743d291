//! The focus session value object.
//!
//! A session is plain data. Its serialized form (camelCase JSON) is the
//! persisted record hosts write to storage, so field names here are part of
//! the on-disk schema and must not change.

use serde::{Deserialize, Serialize};

/// One focus timer instance. Absence is modelled as `Option::None`.
///
/// Only the engine (and record decoding) builds or changes sessions; outside
/// the crate the fields are read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSession {
    /// Total planned length. Only ever grows, via extend.
    pub(crate) duration_seconds: u64,
    /// Epoch ms at which the current running segment began.
    pub(crate) anchor_started_at_ms: i64,
    /// Seconds counted down by earlier segments, excluding the one since the anchor.
    pub(crate) accumulated_run_seconds: f64,
    pub(crate) is_running: bool,
    pub(crate) created_at_ms: i64,
}

impl TimerSession {
    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn anchor_started_at_ms(&self) -> i64 {
        self.anchor_started_at_ms
    }

    pub fn accumulated_run_seconds(&self) -> f64 {
        self.accumulated_run_seconds
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    /// Seconds counted in the current running segment; zero while stopped.
    ///
    /// A wall clock that moved backwards yields zero rather than a negative
    /// segment, so counted time never shrinks.
    pub(crate) fn segment_seconds(&self, now_ms: i64) -> f64 {
        if !self.is_running {
            return 0.0;
        }
        let delta_ms = now_ms.saturating_sub(self.anchor_started_at_ms).max(0);
        delta_ms as f64 / 1000.0
    }
}

/// Host-observable state, derived from the session fields and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Absent,
    /// Built by start, never run.
    Created,
    Running,
    /// Stopped mid-session with counted time.
    Paused,
}

impl SessionPhase {
    pub fn of(session: Option<&TimerSession>) -> Self {
        match session {
            None => SessionPhase::Absent,
            Some(s) if s.is_running => SessionPhase::Running,
            Some(s) if s.accumulated_run_seconds > 0.0 => SessionPhase::Paused,
            Some(_) => SessionPhase::Created,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Absent => "absent",
            SessionPhase::Created => "created",
            SessionPhase::Running => "running",
            SessionPhase::Paused => "paused",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
