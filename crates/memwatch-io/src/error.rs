use thiserror::Error;

/// Result type local to memwatch-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("sink configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for memwatch_core::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Config(msg) => memwatch_core::Error::Config(msg),
            Error::Io(io) => memwatch_core::Error::Sink(io.to_string()),
        }
    }
}
