//! Append-only provider debug log
//!
//! Every provider request, response and failure is written as one
//! `[<timestamp>Z] <message>` line. The admin endpoints read the tail of
//! the file back. Writers do not lock the file; concurrent requests may
//! interleave lines.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;

/// How many trailing lines the admin endpoints look at.
pub const RECENT_LINES: usize = 20;

const EXCEPTION_MARKER: &str = "EXCEPTION";

#[derive(Debug, Clone)]
pub struct DebugLog {
    path: PathBuf,
}

impl DebugLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a timestamped line. Failures are reported through tracing and
    /// otherwise ignored so logging never breaks a request.
    pub fn append(&self, message: &str) {
        if let Err(e) = self.try_append(message) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write debug log");
        }
    }

    fn try_append(&self, message: &str) -> io::Result<()> {
        let ts = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{}Z] {}", ts, message)
    }

    fn read_lines(&self) -> Vec<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read debug log");
                Vec::new()
            }
        }
    }

    /// Up to the last `limit` lines containing `EXCEPTION`, oldest first.
    pub fn recent_exceptions(&self, limit: usize) -> Vec<String> {
        let errors: Vec<String> = self
            .read_lines()
            .into_iter()
            .filter(|line| line.contains(EXCEPTION_MARKER))
            .map(|line| line.trim().to_string())
            .collect();
        let skip = errors.len().saturating_sub(limit);
        errors.into_iter().skip(skip).collect()
    }

    /// The most recent line within the final `window` lines that mentions
    /// `EXCEPTION` or, case-insensitively, `error`.
    pub fn last_error(&self, window: usize) -> Option<String> {
        let lines = self.read_lines();
        let start = lines.len().saturating_sub(window);
        lines[start..]
            .iter()
            .rev()
            .find(|line| line.contains(EXCEPTION_MARKER) || line.to_lowercase().contains("error"))
            .map(|line| line.trim().to_string())
    }
}
