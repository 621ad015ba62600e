//! `HeapRuntime` backed by a [`TrackingAllocator`].

use std::fmt::Write as _;

use memwatch_core::error::Result;
use memwatch_core::HeapRuntime;

use crate::alloc::{HeapStats, TrackingAllocator};

/// Reads live allocation from a tracking allocator (normally the process's
/// `#[global_allocator]`).
///
/// Rust frees memory deterministically, so `collect` has nothing to reclaim;
/// the counters are already exact. The dump is a text heap profile in the
/// gperftools/pprof legacy layout summarizing the counters.
pub struct TrackingRuntime<A: 'static> {
    allocator: &'static TrackingAllocator<A>,
}

impl<A: 'static> TrackingRuntime<A> {
    pub fn new(allocator: &'static TrackingAllocator<A>) -> Self {
        Self { allocator }
    }

    pub fn stats(&self) -> HeapStats {
        self.allocator.stats()
    }
}

impl<A: Sync + 'static> HeapRuntime for TrackingRuntime<A> {
    fn allocated_bytes(&self) -> u64 {
        self.allocator.allocated_bytes()
    }

    fn collect(&self) {
        #[cfg(feature = "tracing")]
        tracing::trace!("tracking allocator has no collector; counters are exact");
    }

    fn dump_profile(&self) -> Result<Vec<u8>> {
        Ok(render_heap_profile(&self.allocator.stats()).into_bytes())
    }
}

/// Render `stats` as a legacy text heap profile.
pub fn render_heap_profile(stats: &HeapStats) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "heap profile: {}: {} [{}: {}] @ heap/1",
        stats.live_objects, stats.live_bytes, stats.total_allocs, stats.total_bytes
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "# memwatch.TrackingAllocator");
    let _ = writeln!(out, "# LiveBytes = {}", stats.live_bytes);
    let _ = writeln!(out, "# LiveObjects = {}", stats.live_objects);
    let _ = writeln!(out, "# TotalAllocs = {}", stats.total_allocs);
    let _ = writeln!(out, "# TotalBytes = {}", stats.total_bytes);
    out
}
