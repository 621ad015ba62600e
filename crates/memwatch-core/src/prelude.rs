//! Convenience re-exports for downstream crates.

pub use crate::config::{MonitorConfig, SinkConfig};
pub use crate::error::{Error, Result};
pub use crate::runtime::HeapRuntime;
pub use crate::sink::ProfileSink;
pub use crate::snapshot::Snapshot;
