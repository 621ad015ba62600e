use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use memwatch_core::error::{Error as CoreError, Result as CoreResult};
use memwatch_core::ProfileSink;

use crate::error::Result;

/// Local filesystem sink: every profile becomes `<root>/<file_name>`.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn target(&self, file_name: &str) -> CoreResult<PathBuf> {
        // Names are flat; anything that could escape the root is refused.
        let name = Path::new(file_name);
        let flat = name.components().count() == 1
            && name.file_name().map(|n| n == name.as_os_str()).unwrap_or(false);
        if file_name.is_empty() || !flat {
            return Err(CoreError::Sink(format!("invalid profile name '{file_name}'")));
        }
        Ok(self.root.join(name))
    }

    fn persist(&self, path: &Path, payload: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let mut f = File::create(path)?;
        f.write_all(payload)?;
        f.flush()?;
        Ok(())
    }
}

impl ProfileSink for FsSink {
    fn write(&self, file_name: &str, payload: &[u8]) -> CoreResult<()> {
        let p = self.target(file_name)?;
        self.persist(&p, payload)
            .map_err(|e| CoreError::Sink(format!("{}: {e}", p.display())))?;
        tracing::debug!(path = %p.display(), bytes = payload.len(), "profile written");
        Ok(())
    }
}
