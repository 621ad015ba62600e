//! A single heap-profile capture on its way to a sink.

use chrono::{DateTime, Utc};

use crate::naming::profile_file_name;

/// One captured heap profile plus the name it will be stored under.
///
/// Not retained by the monitor: the payload is handed to the sink and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    file_name: String,
    captured_at: DateTime<Utc>,
    payload: Vec<u8>,
}

impl Snapshot {
    /// Wrap `payload` captured at `captured_at`, deriving its file name.
    pub fn new(captured_at: DateTime<Utc>, payload: Vec<u8>) -> Self {
        Self {
            file_name: profile_file_name(&captured_at),
            captured_at,
            payload,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// BLAKE3 hex digest of the payload, logged next to the file name so a
    /// stored artifact can be matched to the tick that produced it.
    pub fn digest(&self) -> String {
        blake3::hash(&self.payload).to_hex().to_string()
    }

    /// Split into `(file_name, payload)` for the sink call.
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.file_name, self.payload)
    }
}
