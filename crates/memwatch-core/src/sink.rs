//! The write-only sink capability profiles are handed to.
//!
//! Concrete sinks live in `memwatch-io`. The monitor never retries a failed
//! write and never reads back what it wrote.

use crate::error::Result;

/// Destination for heap-profile snapshots, keyed by file name.
///
/// Implementations may persist anywhere (local disk, object storage, an
/// upload endpoint). `write` is called synchronously from the monitor's
/// blocking pool, one call per emitted snapshot.
pub trait ProfileSink: Send + Sync {
    /// Persist `payload` under `file_name`.
    fn write(&self, file_name: &str, payload: &[u8]) -> Result<()>;
}

impl<S: ProfileSink + ?Sized> ProfileSink for std::sync::Arc<S> {
    fn write(&self, file_name: &str, payload: &[u8]) -> Result<()> {
        (**self).write(file_name, payload)
    }
}

impl<S: ProfileSink + ?Sized> ProfileSink for Box<S> {
    fn write(&self, file_name: &str, payload: &[u8]) -> Result<()> {
        (**self).write(file_name, payload)
    }
}
