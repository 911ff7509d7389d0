use approval_core::CoreError;
use approval_reporters::ReporterError;
use approval_surface::LoadError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// No approved file exists yet.
    MissingBaseline,
    /// Both exist; `first_line` is the first differing line, 1-based.
    ContentDiffers { first_line: usize },
}

/// A rejected candidate, with the two files an operator needs to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub received: PathBuf,
    pub approved: PathBuf,
    pub kind: MismatchKind,
}

impl Mismatch {
    pub fn received(&self) -> &Path {
        &self.received
    }

    pub fn approved(&self) -> &Path {
        &self.approved
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MismatchKind::MissingBaseline => write!(
                f,
                "no approved baseline at {}; received {}",
                self.approved.display(),
                self.received.display()
            ),
            MismatchKind::ContentDiffers { first_line } => write!(
                f,
                "surface differs from {} at line {}; received {}",
                self.approved.display(),
                first_line,
                self.received.display()
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Configuration(#[source] ReporterError),

    #[error("Mismatch: {0}")]
    Mismatch(Mismatch),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApprovalError {
    pub fn as_mismatch(&self) -> Option<&Mismatch> {
        match self {
            Self::Mismatch(mismatch) => Some(mismatch),
            _ => None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<ReporterError> for ApprovalError {
    fn from(err: ReporterError) -> Self {
        Self::Configuration(err)
    }
}

pub type ApprovalResult<T> = Result<T, ApprovalError>;
