//! In-memory sink for testing.
//!
//! Records every write in order, including repeated names, so tests can assert
//! on exactly which ticks emitted. Payloads are kept until `clear`, so hold on
//! to a clone and drain it; `build_sink_from_config` never hands one out.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use memwatch_core::error::Result as CoreResult;
use memwatch_core::ProfileSink;

/// Thread-safe in-memory sink. Clones share the same record.
#[derive(Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, Vec<u8>)>> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of writes received.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// File names in the order they were written.
    pub fn file_names(&self) -> Vec<String> {
        self.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    /// Payload of the most recent write under `file_name`.
    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.lock()
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.clone())
    }

    /// Check if a name was written
    pub fn contains(&self, file_name: &str) -> bool {
        self.lock().iter().any(|(name, _)| name == file_name)
    }

    /// Clear all recorded writes
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl std::fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySink")
            .field("writes", &self.len())
            .finish()
    }
}

impl ProfileSink for MemorySink {
    fn write(&self, file_name: &str, payload: &[u8]) -> CoreResult<()> {
        self.lock().push((file_name.to_string(), payload.to_vec()));
        Ok(())
    }
}
