use crate::error::{ApprovalError, ApprovalResult, Mismatch, MismatchKind};
use approval_core::{ApprovalSettings, BaselinePath, BaselineStore, CandidateText};
use approval_reporters::{Reporter, ReporterRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A candidate that matched its baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approved {
    pub approved: PathBuf,
}

/// Compares candidates against baselines and reports mismatches.
///
/// The reporter is resolved once, at construction, so a misconfigured name
/// fails before any case runs.
#[derive(Clone)]
pub struct ApprovalEngine {
    store: BaselineStore,
    reporter: Arc<dyn Reporter>,
}

impl ApprovalEngine {
    pub fn new(store: BaselineStore, reporter: Arc<dyn Reporter>) -> Self {
        Self { store, reporter }
    }

    /// Resolves the reporter named by `settings` through `registry`.
    pub fn from_settings(
        store: BaselineStore,
        settings: &ApprovalSettings,
        registry: &ReporterRegistry,
    ) -> ApprovalResult<Self> {
        let reporter = registry.resolve(settings)?;
        Ok(Self::new(store, reporter))
    }

    pub fn store(&self) -> &BaselineStore {
        &self.store
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    /// Approves `candidate` against the baseline at `path`.
    ///
    /// On mismatch the candidate is written to the received path and the
    /// reporter runs exactly once before the error is returned.
    pub fn approve(&self, candidate: &CandidateText, path: &BaselinePath) -> ApprovalResult<Approved> {
        let kind = match self.store.read(path)? {
            Some(baseline) if candidate.matches(&baseline) => {
                if self.store.discard_received(path)? {
                    debug!(received = %path.received().display(), "removed stale received file");
                }
                info!(approved = %path.approved().display(), "surface approved");
                return Ok(Approved {
                    approved: path.approved().to_path_buf(),
                });
            }
            Some(baseline) => MismatchKind::ContentDiffers {
                first_line: candidate.first_difference(&baseline).unwrap_or(1),
            },
            None => MismatchKind::MissingBaseline,
        };

        let received = self.store.write_received(path, candidate)?;
        self.report(&received, path.approved());

        let mismatch = Mismatch {
            received,
            approved: path.approved().to_path_buf(),
            kind,
        };
        info!(%mismatch, "surface mismatch");
        Err(ApprovalError::Mismatch(mismatch))
    }

    fn report(&self, received: &Path, approved: &Path) {
        debug!(reporter = self.reporter.name(), "reporting mismatch");
        if let Err(e) = self.reporter.report(received, approved) {
            warn!(reporter = self.reporter.name(), error = %e, "reporter failed");
        }
    }
}
