use std::path::PathBuf;
use thiserror::Error;

/// Failure to load an artifact as surface metadata. Fatal to the case.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("artifact {} could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {} is not valid surface metadata: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("artifact {} has format version {found}, expected {expected}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Missing(path) => path,
            Self::Unreadable { path, .. }
            | Self::Malformed { path, .. }
            | Self::UnsupportedVersion { path, .. } => path,
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
