//! # Focusloop Core Library
//!
//! This library provides the focus timer behind the Focusloop app. All timer
//! logic lives here; the CLI (and any UI host) is a thin layer that owns the
//! current session, persists it, and calls into the engine.
//!
//! ## Architecture
//!
//! - **Timer Engine**: pure transition and derived-value functions over an
//!   immutable session value. Remaining time is always computed from
//!   wall-clock timestamps, so it survives app suspension and irregular ticks
//! - **Storage**: the persisted session record, a SQLite key-value store and
//!   TOML-based configuration
//! - **Host**: a single-writer driver that persists every change and completes
//!   sessions when they reach zero
//!
//! ## Key Components
//!
//! - [`TimerSession`]: the session value object
//! - [`timer::engine`]: start / resume / pause / extend / stop and the derived values
//! - [`FocusHost`]: state container, persistence and completion detection
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod host;
pub mod storage;
pub mod timer;

pub use error::{
    ConfigError, CoreError, RecordError, StoreError, TransitionErrorKind, TransitionFailure,
};
pub use events::Event;
pub use host::{CompletionHook, FocusHost, HostOutcome, NoopHook};
pub use storage::{Config, Database, MemoryStore, SessionStore};
pub use timer::{Clock, ManualClock, SessionPhase, SystemClock, TimerEngine, TimerSession};
