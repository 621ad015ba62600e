#![forbid(unsafe_code)]
//! memwatch-core: configuration, profile naming, and the capability traits
//! shared by every memwatch crate.
//!
//! The monitor loop lives in `memwatch-exec`; concrete heap runtimes live in
//! `memwatch-mem` and concrete sinks in `memwatch-io`. Nothing here performs
//! I/O or spawns tasks.

pub mod config;
pub mod error;
pub mod naming;
pub mod runtime;
pub mod sink;
pub mod snapshot;

pub mod prelude;

pub use config::{MonitorConfig, MonitorConfigBuilder, SinkConfig};
pub use error::{Error, Result};
pub use runtime::HeapRuntime;
pub use sink::ProfileSink;
pub use snapshot::Snapshot;
