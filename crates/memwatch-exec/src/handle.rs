//! Handle for a monitor running in a background task.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{MonitorError, Result};
use crate::monitor::{Monitor, MonitorState};
use crate::outcome::MonitorSummary;

/// Returned by [`Monitor::spawn`]. Dropping the handle does not stop the
/// monitor; call [`stop`](Self::stop) or [`shutdown`](Self::shutdown).
pub struct MonitorHandle {
    monitor: Arc<Monitor>,
    cancel: CancellationToken,
    task: JoinHandle<Result<MonitorSummary>>,
}

impl MonitorHandle {
    pub(crate) fn new(
        monitor: Arc<Monitor>,
        cancel: CancellationToken,
        task: JoinHandle<Result<MonitorSummary>>,
    ) -> Self {
        Self {
            monitor,
            cancel,
            task,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.monitor.state()
    }

    pub fn peak_allocated_bytes(&self) -> u64 {
        self.monitor.peak_allocated_bytes()
    }

    /// Token that stops this monitor when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request a stop without waiting for it.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Check if the monitor task has completed
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Request a stop and wait for the loop to exit.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::Task` if the monitor task panicked or was aborted.
    pub async fn shutdown(self) -> Result<MonitorSummary> {
        self.cancel.cancel();
        self.join().await
    }

    /// Wait for the loop to exit on its own (e.g. an external token fired).
    pub async fn join(self) -> Result<MonitorSummary> {
        self.task
            .await
            .map_err(|e| MonitorError::Task(format!("monitor task: {e}")))
            .and_then(|result| result)
    }
}
