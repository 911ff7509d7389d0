//! Appends one JSON line per mismatch to a log file.

use crate::error::{ReporterError, ReporterResult};
use crate::reporter::Reporter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single mismatch log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MismatchRecord {
    pub timestamp: DateTime<Utc>,
    pub received: PathBuf,
    pub approved: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LogReporter {
    path: PathBuf,
}

impl LogReporter {
    pub const NAME: &'static str = "ApprovalTests.Reporters.LogReporter";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every record in the log. A missing log is empty.
    pub fn read_records(path: &Path) -> ReporterResult<Vec<MismatchRecord>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ReporterError::io(path, e)),
        };
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(ReporterError::from))
            .collect()
    }
}

impl Reporter for LogReporter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn report(&self, received: &Path, approved: &Path) -> ReporterResult<()> {
        let record = MismatchRecord {
            timestamp: Utc::now(),
            received: received.to_path_buf(),
            approved: approved.to_path_buf(),
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ReporterError::io(parent, e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ReporterError::io(&self.path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| ReporterError::io(&self.path, e))?;

        debug!(log = %self.path.display(), "mismatch recorded");
        Ok(())
    }
}
