//! Sink adapters implementing `memwatch_core::ProfileSink`.
//!
//! - `fs`: Local filesystem (default).
//!
//! Also exposes `build_sink_from_config`, which chooses the sink based on the
//! configured URI (`file:///var/lib/profiles` or a bare path). In-memory
//! sinks are not reachable from config: nothing would drain them.

mod fs;
pub use fs::FsSink;

use std::sync::Arc;

use memwatch_core::config::SinkConfig;
use memwatch_core::ProfileSink;
use url::Url;

use crate::error::{Error, Result};

/// Build the sink described by `cfg`.
pub fn build_sink_from_config(cfg: &SinkConfig) -> Result<Arc<dyn ProfileSink>> {
    match (cfg.scheme(), cfg.uri.as_deref()) {
        (Some("file"), Some(uri)) => {
            let root = Url::parse(uri)
                .map_err(|e| Error::Config(format!("invalid file uri '{uri}': {e}")))?
                .to_file_path()
                .map_err(|_| Error::Config(format!("file uri '{uri}' is not a local path")))?;
            Ok(Arc::new(FsSink::new(root)))
        }
        (Some(other), _) => Err(Error::Config(format!("unsupported sink scheme '{other}'"))),
        // No scheme: treat a bare URI as a path, otherwise fall back to the directory.
        (None, Some(path)) if !path.trim().is_empty() => Ok(Arc::new(FsSink::new(path.trim()))),
        (None, _) => {
            if cfg.dir.trim().is_empty() {
                return Err(Error::Config("sink directory cannot be empty".into()));
            }
            Ok(Arc::new(FsSink::new(&cfg.dir)))
        }
    }
}
