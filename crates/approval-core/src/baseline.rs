//! Baseline storage under `<source_root>/ApprovedApi/<component>/<variant>.approved.txt`.
//!
//! Baselines live next to the test sources rather than the build output, so
//! they travel with the code under review.

use crate::error::{CoreError, CoreResult};
use crate::paths::absolutize;
use crate::types::{ApprovalRequest, CandidateText};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APPROVED_API_DIR: &str = "ApprovedApi";
pub const APPROVED_SUFFIX: &str = ".approved.txt";
pub const RECEIVED_SUFFIX: &str = ".received.txt";

/// The approved baseline of one case and its sibling received file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaselinePath {
    approved: PathBuf,
    received: PathBuf,
}

impl BaselinePath {
    pub fn approved(&self) -> &Path {
        &self.approved
    }

    pub fn received(&self) -> &Path {
        &self.received
    }
}

/// A received file waiting for an operator decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingApproval {
    pub request: ApprovalRequest,
    pub path: BaselinePath,
}

#[derive(Debug, Clone)]
pub struct BaselineStore {
    root: PathBuf,
}

impl BaselineStore {
    /// Creates a store rooted at `<source_root>/ApprovedApi`.
    pub fn new(source_root: impl AsRef<Path>) -> CoreResult<Self> {
        Ok(Self {
            root: absolutize(source_root.as_ref())?.join(APPROVED_API_DIR),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pure function of the request and the source root.
    pub fn resolve_path(&self, request: &ApprovalRequest) -> BaselinePath {
        let dir = self.root.join(request.component());
        BaselinePath {
            approved: dir.join(format!("{}{}", request.variant(), APPROVED_SUFFIX)),
            received: dir.join(format!("{}{}", request.variant(), RECEIVED_SUFFIX)),
        }
    }

    /// Reads the approved text; a missing baseline is `Ok(None)`.
    pub fn read(&self, path: &BaselinePath) -> CoreResult<Option<String>> {
        match fs::read_to_string(&path.approved) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.approved.display(), "no approved baseline");
                Ok(None)
            }
            Err(e) => Err(CoreError::io(&path.approved, e)),
        }
    }

    /// Persists the rejected candidate verbatim, overwriting any earlier one.
    pub fn write_received(&self, path: &BaselinePath, candidate: &CandidateText) -> CoreResult<PathBuf> {
        if let Some(parent) = path.received.parent() {
            fs::create_dir_all(parent).map_err(|e| CoreError::io(parent, e))?;
        }
        fs::write(&path.received, candidate.as_bytes())
            .map_err(|e| CoreError::io(&path.received, e))?;
        debug!(path = %path.received.display(), bytes = candidate.as_bytes().len(), "wrote received file");
        Ok(path.received.clone())
    }

    /// Removes a stale received file. Returns whether one existed.
    pub fn discard_received(&self, path: &BaselinePath) -> CoreResult<bool> {
        match fs::remove_file(&path.received) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CoreError::io(&path.received, e)),
        }
    }

    /// Accepts the received file as the new approved baseline.
    pub fn promote(&self, path: &BaselinePath) -> CoreResult<()> {
        if !path.received.is_file() {
            return Err(CoreError::NothingToPromote(path.received.clone()));
        }
        fs::rename(&path.received, &path.approved).map_err(|e| CoreError::io(&path.approved, e))?;
        info!(approved = %path.approved.display(), "promoted received file");
        Ok(())
    }

    /// All received files under the store, sorted by request.
    pub fn pending(&self) -> CoreResult<Vec<PendingApproval>> {
        let mut pending: Vec<PendingApproval> = self
            .scan(RECEIVED_SUFFIX)?
            .into_iter()
            .map(|request| PendingApproval {
                path: self.resolve_path(&request),
                request,
            })
            .collect();
        pending.sort_by(|a, b| a.request.cmp(&b.request));
        Ok(pending)
    }

    /// Every (component, variant) pair that has an approved baseline, sorted.
    pub fn baselines(&self) -> CoreResult<Vec<ApprovalRequest>> {
        let mut requests = self.scan(APPROVED_SUFFIX)?;
        requests.sort();
        Ok(requests)
    }

    fn scan(&self, suffix: &str) -> CoreResult<Vec<ApprovalRequest>> {
        let mut found = Vec::new();
        if !self.root.is_dir() {
            return Ok(found);
        }
        for component_dir in read_dir(&self.root)? {
            if !component_dir.is_dir() {
                continue;
            }
            let Some(component) = component_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            for file in read_dir(&component_dir)? {
                let Some(variant) = file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_suffix(suffix))
                else {
                    continue;
                };
                if let Ok(request) = ApprovalRequest::new(component, variant) {
                    found.push(request);
                }
            }
        }
        Ok(found)
    }
}

fn read_dir(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| CoreError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::io(dir, e))?;
        paths.push(entry.path());
    }
    Ok(paths)
}
