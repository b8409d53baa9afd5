//! Detected model cache
//!
//! A single plain-text file holding the model id that the startup probe
//! accepted. Written once, never invalidated, last writer wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DetectedModelCache {
    path: PathBuf,
}

impl DetectedModelCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Trimmed file content, or `None` when the file is missing or unreadable.
    /// An existing empty file yields `Some("")`.
    pub fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read detected model cache");
                None
            }
        }
    }

    /// Cached model id, ignoring an empty file.
    pub fn model(&self) -> Option<String> {
        self.read().filter(|model| !model.is_empty())
    }

    pub fn write(&self, model: &str) -> io::Result<()> {
        fs::write(&self.path, model)
    }
}
