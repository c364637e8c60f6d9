//! The published .ics file.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::SheetCalResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content was byte-identical; the file was not touched
    Unchanged,
    Written,
}

impl WriteOutcome {
    pub fn changed(&self) -> bool {
        *self == WriteOutcome::Written
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Unchanged => write!(f, "unchanged"),
            WriteOutcome::Written => write!(f, "written"),
        }
    }
}

/// Calendar file at a fixed path, rewritten only when its content changes.
///
/// Skipping identical writes keeps the file's mtime and the repository it
/// lives in quiet, so a scheduled job doesn't commit or deploy for nothing.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        OutputFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file content. A missing file reads as empty.
    pub fn read_existing(&self) -> SheetCalResult<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn needs_write(&self, content: &str) -> SheetCalResult<bool> {
        Ok(self.read_existing()? != content)
    }

    pub fn write_if_changed(&self, content: &str) -> SheetCalResult<WriteOutcome> {
        if !self.needs_write(content)? {
            debug!(path = %self.path.display(), "calendar unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;

        info!(path = %self.path.display(), bytes = content.len(), "calendar written");
        Ok(WriteOutcome::Written)
    }
}
