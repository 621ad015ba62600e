//! Per-tick outcomes and the end-of-run summary.

/// What a single check-and-emit pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Allocation was under the threshold; nothing captured.
    BelowThreshold { allocated_bytes: u64 },
    /// A profile was captured and the sink accepted it.
    Emitted {
        allocated_bytes: u64,
        file_name: String,
        bytes: usize,
    },
    /// The heap dump failed; no write was attempted.
    CaptureFailed { allocated_bytes: u64 },
    /// The sink returned an error or timed out.
    SinkFailed {
        allocated_bytes: u64,
        file_name: String,
    },
    /// A previous write is still running past its timeout; nothing was
    /// captured this tick.
    SinkBusy { allocated_bytes: u64 },
}

impl TickOutcome {
    pub fn allocated_bytes(&self) -> u64 {
        match self {
            TickOutcome::BelowThreshold { allocated_bytes }
            | TickOutcome::Emitted {
                allocated_bytes, ..
            }
            | TickOutcome::CaptureFailed { allocated_bytes }
            | TickOutcome::SinkFailed {
                allocated_bytes, ..
            }
            | TickOutcome::SinkBusy { allocated_bytes } => *allocated_bytes,
        }
    }

    /// True when the tick crossed the threshold (whether or not emission succeeded).
    pub fn triggered(&self) -> bool {
        !matches!(self, TickOutcome::BelowThreshold { .. })
    }
}

/// Counters for one `run`, returned when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    pub ticks: u64,
    pub snapshots_emitted: u64,
    pub capture_failures: u64,
    /// Failed or timed-out writes, plus ticks skipped behind a stuck write.
    pub sink_failures: u64,
    /// Highest allocation sampled during the run.
    pub peak_allocated_bytes: u64,
}

impl MonitorSummary {
    pub fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::BelowThreshold { .. } => {}
            TickOutcome::Emitted { .. } => self.snapshots_emitted += 1,
            TickOutcome::CaptureFailed { .. } => self.capture_failures += 1,
            TickOutcome::SinkFailed { .. } | TickOutcome::SinkBusy { .. } => {
                self.sink_failures += 1
            }
        }
    }
}
