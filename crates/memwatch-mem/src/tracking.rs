//! Lightweight peak tracking hooks.
//!
//! Keep this optional and cheap. Downstream can wire to OpenTelemetry/Prom if desired.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct PeakTracker {
    peak_bytes: AtomicU64,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self {
            peak_bytes: AtomicU64::new(0),
        }
    }

    /// Record a sampled allocation; updates peak if higher.
    pub fn record(&self, allocated_bytes: u64) {
        let prev = self.peak_bytes.fetch_max(allocated_bytes, Ordering::AcqRel);
        if allocated_bytes > prev {
            trace_new_peak(allocated_bytes, prev);
        }
    }

    pub fn peak(&self) -> u64 {
        self.peak_bytes.load(Ordering::Relaxed)
    }
}

#[cfg(feature = "tracing")]
fn trace_new_peak(allocated_bytes: u64, previous_peak: u64) {
    tracing::trace!(allocated_bytes, previous_peak, "new allocation peak");
}

#[cfg(not(feature = "tracing"))]
fn trace_new_peak(_allocated_bytes: u64, _previous_peak: u64) { /* no-op */
}
