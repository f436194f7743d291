mod config;
pub mod database;
mod memory;
pub mod record;

pub use config::{Config, NotificationsConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use tracing::warn;

use crate::error::StoreError;
use crate::timer::TimerSession;

/// Somewhere the persisted session record lives between host runs.
///
/// Implementors only move the raw record around; encoding, validation and
/// recovery from unreadable records are shared by the provided methods.
pub trait SessionStore {
    /// The raw record, or `None` for "no record".
    fn load_record(&self) -> Result<Option<String>, StoreError>;

    fn save_record(&mut self, record: &str) -> Result<(), StoreError>;

    fn clear_record(&mut self) -> Result<(), StoreError>;

    /// Load the persisted session.
    ///
    /// A record that cannot be decoded is treated as "no session": it is
    /// logged, discarded, and the host starts from Absent.
    fn load_session(&mut self) -> Result<Option<TimerSession>, StoreError> {
        let Some(raw) = self.load_record()? else {
            return Ok(None);
        };
        match record::decode(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!(%err, "discarding unreadable focus session record");
                self.clear_record()?;
                Ok(None)
            }
        }
    }

    /// Write `session`, or remove the record when it is `None`.
    fn persist(&mut self, session: Option<&TimerSession>) -> Result<(), StoreError> {
        match record::encode(session)? {
            Some(raw) => self.save_record(&raw),
            None => self.clear_record(),
        }
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn load_record(&self) -> Result<Option<String>, StoreError> {
        (**self).load_record()
    }

    fn save_record(&mut self, record: &str) -> Result<(), StoreError> {
        (**self).save_record(record)
    }

    fn clear_record(&mut self) -> Result<(), StoreError> {
        (**self).clear_record()
    }
}

/// Returns `~/.config/focusloop[-dev]/`.
///
/// `FOCUSLOOP_HOME` overrides the location outright; otherwise
/// `FOCUSLOOP_ENV=dev` selects the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("FOCUSLOOP_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSLOOP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusloop-dev")
            } else {
                base_dir.join("focusloop")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
