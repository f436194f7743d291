use super::SessionStore;
use crate::error::StoreError;

/// Keeps the session record in memory.
///
/// For tests and for embedders that persist through their own key-value
/// store: read [`MemoryStore::record`] after each change and write it out.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw record, as if read from disk.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl SessionStore for MemoryStore {
    fn load_record(&self) -> Result<Option<String>, StoreError> {
        Ok(self.record.clone())
    }

    fn save_record(&mut self, record: &str) -> Result<(), StoreError> {
        self.record = Some(record.to_string());
        Ok(())
    }

    fn clear_record(&mut self) -> Result<(), StoreError> {
        self.record = None;
        Ok(())
    }
}
