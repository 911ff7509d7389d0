use crate::engine::{ApprovalEngine, Approved};
use crate::error::ApprovalResult;
use approval_core::{ApprovalRequest, ArtifactLocator, CandidateText};
use approval_surface::{MetadataExtractor, SurfaceExtractor};
use std::sync::Arc;
use tracing::{info_span, warn};

/// Result of one case in a batch run.
#[derive(Debug)]
pub struct CaseOutcome {
    pub request: ApprovalRequest,
    pub result: ApprovalResult<Approved>,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Locator → extractor → engine, wired once and shared by every case.
#[derive(Clone)]
pub struct ApprovalHarness {
    locator: ArtifactLocator,
    extractor: Arc<dyn SurfaceExtractor>,
    engine: ApprovalEngine,
}

impl ApprovalHarness {
    pub fn new(
        locator: ArtifactLocator,
        extractor: Arc<dyn SurfaceExtractor>,
        engine: ApprovalEngine,
    ) -> Self {
        Self {
            locator,
            extractor,
            engine,
        }
    }

    /// Harness reading JSON surface metadata artifacts.
    pub fn with_metadata_extractor(locator: ArtifactLocator, engine: ApprovalEngine) -> Self {
        Self::new(locator, Arc::new(MetadataExtractor::new()), engine)
    }

    pub fn locator(&self) -> &ArtifactLocator {
        &self.locator
    }

    pub fn engine(&self) -> &ApprovalEngine {
        &self.engine
    }

    /// Extracts the current surface for `request` without comparing it.
    pub fn render(&self, request: &ApprovalRequest) -> ApprovalResult<CandidateText> {
        let artifact = self.locator.locate(request);
        Ok(self.extractor.extract(&artifact)?)
    }

    /// Runs one case end to end.
    pub fn verify(&self, request: &ApprovalRequest) -> ApprovalResult<Approved> {
        let _span = info_span!("case", %request).entered();
        let candidate = self.render(request)?;
        let path = self.engine.store().resolve_path(request);
        self.engine.approve(&candidate, &path)
    }

    /// Runs every case in order. A failing case never stops its siblings.
    pub fn verify_all<'a, I>(&self, requests: I) -> Vec<CaseOutcome>
    where
        I: IntoIterator<Item = &'a ApprovalRequest>,
    {
        requests
            .into_iter()
            .map(|request| {
                let result = self.verify(request);
                if let Err(e) = &result {
                    if !e.is_mismatch() {
                        warn!(%request, error = %e, "case failed");
                    }
                }
                CaseOutcome {
                    request: request.clone(),
                    result,
                }
            })
            .collect()
    }
}
