//! Error types for the CLI

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] approval_config::ConfigError),

    #[error("{0}")]
    Approval(#[from] approval_engine::ApprovalError),

    #[error("Reporter error: {0}")]
    Reporter(#[from] approval_reporters::ReporterError),

    #[error("{0}")]
    Core(#[from] approval_core::CoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{failed} of {total} cases failed")]
    CasesFailed { failed: usize, total: usize },

    #[error("General error: {0}")]
    General(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::General(format!("{:#}", err))
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::General(format!("case task failed: {}", err))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
