//! Error types for reporters and reporter resolution

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Unknown reporter '{requested}' (resolved as '{normalized}'); known reporters: {}", .known.join(", "))]
    UnknownReporter {
        requested: String,
        normalized: String,
        known: Vec<String>,
    },

    #[error("Failed to launch '{tool}': {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReporterError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Whether this error means the configured reporter name is wrong.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownReporter { .. })
    }
}

pub type ReporterResult<T> = Result<T, ReporterError>;
