pub mod baseline;
pub mod error;
pub mod locator;
pub mod paths;
pub mod settings;
pub mod types;

// Re-export commonly used types
pub use baseline::{
    BaselinePath, BaselineStore, PendingApproval, APPROVED_API_DIR, APPROVED_SUFFIX,
    RECEIVED_SUFFIX,
};
pub use error::{CoreError, CoreResult};
pub use locator::{ArtifactLocator, BuildConfiguration, DEFAULT_ARTIFACT_EXTENSION};
pub use settings::{ApprovalSettings, LEGACY_REPORTER_ENV_VAR, REPORTER_ENV_VAR};
pub use types::{ApprovalRequest, CandidateText};
