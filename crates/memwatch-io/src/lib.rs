#![forbid(unsafe_code)]
//! memwatch-io: concrete implementations of `memwatch_core::ProfileSink`.
//!
//! - `FsSink`: writes each profile as a file under a root directory.
//! - `MemorySink`: keeps every write in memory; constructed directly by tests
//!   and embedders that drain it.
//!
//! `build_sink_from_config` picks one from a `SinkConfig`.

pub mod error;
pub mod memory_sink;
pub mod sink;

pub use error::{Error, Result};
pub use memory_sink::MemorySink;
pub use sink::{build_sink_from_config, FsSink};
