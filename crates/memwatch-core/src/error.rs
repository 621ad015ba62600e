use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Heap profile capture failed: {0}")]
    Capture(String),

    #[error("Profile sink error: {0}")]
    Sink(String),
}
