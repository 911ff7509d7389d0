use crate::error::{LoadError, LoadResult};
use crate::metadata::{ComponentMetadata, FORMAT_VERSION};
use crate::render::render;
use approval_core::CandidateText;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Produces the public-surface text of the artifact at a path.
///
/// Implementations must be deterministic and must not cache across calls.
pub trait SurfaceExtractor: Send + Sync {
    fn extract(&self, artifact: &Path) -> LoadResult<CandidateText>;
}

/// A loaded artifact, owned for the duration of one case.
#[derive(Debug, Clone)]
pub struct Artifact {
    path: PathBuf,
    metadata: ComponentMetadata,
}

impl Artifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &ComponentMetadata {
        &self.metadata
    }

    pub fn render(&self) -> CandidateText {
        render(&self.metadata)
    }
}

#[derive(Deserialize)]
struct VersionHeader {
    format_version: Option<u32>,
}

/// Extractor for the JSON surface metadata documents.
#[derive(Debug, Clone, Default)]
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Reads and validates the document at `path`.
    pub fn load(&self, path: &Path) -> LoadResult<Artifact> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::Missing(path.to_path_buf()),
            _ => LoadError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let header: VersionHeader = serde_json::from_slice(&bytes).map_err(|e| malformed(path, e))?;
        match header.format_version {
            Some(FORMAT_VERSION) => {}
            Some(found) => {
                return Err(LoadError::UnsupportedVersion {
                    path: path.to_path_buf(),
                    found,
                    expected: FORMAT_VERSION,
                })
            }
            None => {
                return Err(LoadError::Malformed {
                    path: path.to_path_buf(),
                    reason: "missing format_version".to_string(),
                })
            }
        }

        let metadata: ComponentMetadata =
            serde_json::from_slice(&bytes).map_err(|e| malformed(path, e))?;
        debug!(
            path = %path.display(),
            component = %metadata.component,
            modules = metadata.modules.len(),
            "loaded surface metadata"
        );
        Ok(Artifact {
            path: path.to_path_buf(),
            metadata,
        })
    }
}

impl SurfaceExtractor for MetadataExtractor {
    fn extract(&self, artifact: &Path) -> LoadResult<CandidateText> {
        Ok(self.load(artifact)?.render())
    }
}

/// Adapts a closure into an extractor, for harnesses with their own loaders.
pub struct FnExtractor<F>(pub F);

impl<F> SurfaceExtractor for FnExtractor<F>
where
    F: Fn(&Path) -> LoadResult<CandidateText> + Send + Sync,
{
    fn extract(&self, artifact: &Path) -> LoadResult<CandidateText> {
        (self.0)(artifact)
    }
}

fn malformed(path: &Path, err: serde_json::Error) -> LoadError {
    LoadError::Malformed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
