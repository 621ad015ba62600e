#![deny(unsafe_code)]
//! memwatch-mem: concrete implementations of `memwatch_core::HeapRuntime`.
//!
//! - `TrackingAllocator` + `TrackingRuntime`: a counting wrapper around any
//!   `GlobalAlloc`. Install it with `#[global_allocator]` and hand the static
//!   to `TrackingRuntime`.
//! - `JemallocRuntime` (feature `jemalloc`): reads `stats.allocated` and dumps
//!   pprof heap profiles through jemalloc's profiler.
//!
//! No async or sink IO lives here.

pub mod alloc;
pub mod runtime;
pub mod tracking;

#[cfg(feature = "jemalloc")]
pub mod jemalloc;

pub use alloc::{HeapStats, TrackingAllocator};
pub use runtime::TrackingRuntime;
pub use tracking::PeakTracker;

#[cfg(feature = "jemalloc")]
pub use jemalloc::JemallocRuntime;
