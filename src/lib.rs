#![forbid(unsafe_code)]
//! memwatch: an in-process heap watchdog.
//!
//! Periodically samples live heap allocation; when it reaches the configured
//! threshold the monitor forces a collection pass, captures a heap profile,
//! and writes it to a [`ProfileSink`] as `<YYYYMMDDhhmmss>_<epoch>.pprof`.
//!
//! ```no_run
//! use std::alloc::System;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use memwatch::{CancellationToken, FsSink, Monitor, MonitorConfig, TrackingAllocator, TrackingRuntime};
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator<System> = TrackingAllocator::new(System);
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MonitorConfig::builder()
//!     .threshold_bytes(64 * 1024 * 1024)
//!     .poll_interval(Duration::from_secs(5))
//!     .build()?;
//! let monitor = Monitor::with_config(
//!     config,
//!     Arc::new(FsSink::new("/var/tmp/profiles")),
//!     Arc::new(TrackingRuntime::new(&ALLOC)),
//! );
//! monitor.run_blocking(CancellationToken::new())?;
//! # Ok(())
//! # }
//! ```

pub use memwatch_core::config::{MonitorConfig, MonitorConfigBuilder, SinkConfig};
pub use memwatch_core::naming::profile_file_name;
pub use memwatch_core::{Error, HeapRuntime, ProfileSink, Snapshot};

pub use memwatch_mem::{HeapStats, PeakTracker, TrackingAllocator, TrackingRuntime};
#[cfg(feature = "jemalloc")]
pub use memwatch_mem::JemallocRuntime;

pub use memwatch_io::{build_sink_from_config, FsSink, MemorySink};

pub use memwatch_exec::signal::{cancel_on_shutdown, shutdown_signal, ShutdownSignal};
pub use memwatch_exec::{
    CancellationToken, ErrorObserver, Monitor, MonitorError, MonitorHandle, MonitorState,
    MonitorSummary, TickOutcome,
};
