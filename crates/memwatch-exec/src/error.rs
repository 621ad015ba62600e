use std::time::Duration;

use thiserror::Error;

/// Result type local to memwatch-exec.
pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitor has already been started")]
    AlreadyStarted,

    #[error("heap profile capture failed: {0}")]
    Capture(#[source] memwatch_core::Error),

    #[error("sink write for '{file_name}' failed: {source}")]
    Sink {
        file_name: String,
        #[source]
        source: memwatch_core::Error,
    },

    #[error("sink write for '{file_name}' did not finish within {timeout:?}")]
    SinkTimeout { file_name: String, timeout: Duration },

    #[error("previous sink write is still running; tick skipped")]
    SinkBusy,

    #[error("monitor task failed: {0}")]
    Task(String),

    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}
