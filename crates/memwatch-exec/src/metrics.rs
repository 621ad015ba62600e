//! Tracing hooks for the monitor loop.
//!
//! This module purposefully avoids pulling heavy telemetry stacks; embedders
//! install whatever `tracing` subscriber they already use.

use std::time::Duration;

use crate::outcome::{MonitorSummary, TickOutcome};

pub fn emit_started(threshold_bytes: u64, poll_interval: Duration, sink_timeout: Option<Duration>) {
    tracing::info!(
        threshold_bytes,
        poll_interval_ms = poll_interval.as_millis() as u64,
        sink_timeout_ms = sink_timeout.map(|t| t.as_millis() as u64),
        "memory monitor started"
    );
}

pub fn emit_tick(threshold_bytes: u64, outcome: &TickOutcome) {
    match outcome {
        TickOutcome::BelowThreshold { allocated_bytes } => {
            tracing::debug!(allocated_bytes, threshold_bytes, "allocation below threshold");
        }
        TickOutcome::Emitted {
            allocated_bytes,
            file_name,
            bytes,
        } => {
            tracing::debug!(allocated_bytes, threshold_bytes, %file_name, bytes, "tick emitted profile");
        }
        TickOutcome::CaptureFailed { allocated_bytes } => {
            tracing::debug!(allocated_bytes, threshold_bytes, "tick abandoned: capture failed");
        }
        TickOutcome::SinkFailed {
            allocated_bytes,
            file_name,
        } => {
            tracing::debug!(allocated_bytes, threshold_bytes, %file_name, "tick abandoned: sink failed");
        }
        TickOutcome::SinkBusy { allocated_bytes } => {
            tracing::debug!(allocated_bytes, threshold_bytes, "tick skipped: sink busy");
        }
    }
}

pub fn emit_stopped(summary: &MonitorSummary) {
    tracing::info!(
        ticks = summary.ticks,
        snapshots_emitted = summary.snapshots_emitted,
        capture_failures = summary.capture_failures,
        sink_failures = summary.sink_failures,
        peak_allocated_bytes = summary.peak_allocated_bytes,
        "memory monitor stopped"
    );
}
