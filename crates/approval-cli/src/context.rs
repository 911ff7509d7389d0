//! Builds the harness from configuration file, environment and flags.

use crate::cli::{CaseArgs, GlobalArgs};
use crate::error::{CliError, CliResult};
use anyhow::Context;
use approval_config::{ConfigLoader, HarnessConfig};
use approval_core::paths::absolutize;
use approval_core::{ApprovalRequest, ApprovalSettings, ArtifactLocator, BaselineStore};
use approval_engine::{ApprovalEngine, ApprovalHarness};
use approval_reporters::{ReporterContext, ReporterRegistry};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "approval.yaml";

/// Everything a command needs, resolved once at startup.
pub struct HarnessContext {
    pub config: HarnessConfig,
    pub settings: ApprovalSettings,
}

impl HarnessContext {
    pub fn load(args: &GlobalArgs) -> CliResult<Self> {
        let config = load_config(args)?;
        let settings = reporter_settings(args.reporter.as_deref(), &config);
        debug!(
            source_root = %config.source_root.display(),
            artifacts_root = %config.artifacts_root().display(),
            reporter = ?settings.reporter_override(),
            "harness context"
        );
        Ok(Self { config, settings })
    }

    pub fn store(&self) -> CliResult<BaselineStore> {
        Ok(BaselineStore::new(&self.config.source_root)?)
    }

    pub fn registry(&self) -> ReporterRegistry {
        ReporterRegistry::with_builtin(ReporterContext::new(self.config.mismatch_log()))
    }

    /// Wires locator, extractor and engine; fails on an unknown reporter name.
    pub fn harness(&self) -> CliResult<ApprovalHarness> {
        let engine = ApprovalEngine::from_settings(self.store()?, &self.settings, &self.registry())?;
        let locator = ArtifactLocator::new(
            self.config.artifacts_root(),
            self.config.build_configuration()?,
        )?
        .with_extension(self.config.artifact_extension.clone());
        Ok(ApprovalHarness::with_metadata_extractor(locator, engine))
    }

    /// The single case named on the command line, or the configured matrix.
    pub fn requests(&self, case: &CaseArgs) -> CliResult<Vec<ApprovalRequest>> {
        if let Some(request) = single_request(case)? {
            return Ok(vec![request]);
        }
        if self.config.cases.is_empty() {
            return Err(CliError::InvalidArgument(
                "no cases configured; pass --component and --variant or add cases to the config file"
                    .to_string(),
            ));
        }
        Ok(self.config.requests()?)
    }
}

pub fn single_request(case: &CaseArgs) -> CliResult<Option<ApprovalRequest>> {
    match (&case.component, &case.variant) {
        (Some(component), Some(variant)) => {
            Ok(Some(ApprovalRequest::new(component.as_str(), variant.as_str())?))
        }
        (None, None) => Ok(None),
        _ => Err(CliError::InvalidArgument(
            "--component and --variant must be given together".to_string(),
        )),
    }
}

/// Command line, then environment, then config file; blank means unset.
pub fn reporter_settings(cli_reporter: Option<&str>, config: &HarnessConfig) -> ApprovalSettings {
    let settings = match cli_reporter {
        Some(name) if !name.trim().is_empty() => ApprovalSettings::new().with_reporter(name),
        _ => ApprovalSettings::from_env(),
    };
    settings.or_reporter(config.reporter.clone())
}

fn load_config(args: &GlobalArgs) -> CliResult<HarnessConfig> {
    let mut config = match config_path(args.config.as_deref()) {
        Some(path) => ConfigLoader::new().load_from_file(&path)?,
        None => {
            let cwd = std::env::current_dir().context("reading the working directory")?;
            HarnessConfig::for_source_root(cwd)
        }
    };

    if let Some(root) = &args.source_root {
        config.source_root = absolutize(root)?;
    }
    if let Some(root) = &args.artifacts_root {
        config.artifacts_root = Some(absolutize(root)?);
    }
    if let Some(label) = &args.configuration {
        config.configuration = Some(label.clone());
    }
    Ok(config)
}

/// An explicit `--config` must exist; the default file is optional.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}
