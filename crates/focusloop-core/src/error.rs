//! Core error types for focusloop-core.
//!
//! Transition failures are ordinary values: the engine returns them instead of
//! panicking because they come from UI event handlers, where a double tap on
//! Pause must be harmless. Storage and configuration failures are real errors
//! and propagate with `?`.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::timer::TimerSession;

/// Core error type for focusloop-core.
///
/// Hosts that both touch the store and print events funnel everything here.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session store errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Event or snapshot serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a transition was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionErrorKind {
    /// Start or extend with a non-positive duration
    #[error("duration must be a positive number of minutes")]
    InvalidDuration,

    /// Pause, resume or extend without a session
    #[error("no active focus session")]
    NoActiveSession,

    /// Resume on a running session
    #[error("focus session is already running")]
    AlreadyRunning,

    /// Pause on a session that is not running
    #[error("focus session is not running")]
    AlreadyPaused,
}

/// A refused transition, carrying the input session unchanged.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{kind}")]
pub struct TransitionFailure {
    pub kind: TransitionErrorKind,
    pub session: Option<TimerSession>,
}

impl TransitionFailure {
    pub fn new(kind: TransitionErrorKind, session: Option<TimerSession>) -> Self {
        Self { kind, session }
    }
}

/// Persisted session record errors.
#[derive(Error, Debug)]
pub enum RecordError {
    /// Not JSON, or missing required fields
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Parsed, but a field breaks a session invariant
    #[error("invalid session record field '{field}': {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

/// Session store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// Session could not be encoded
    #[error("Failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration value
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
