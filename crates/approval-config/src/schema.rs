//! Harness configuration schema.

use crate::error::{ConfigError, ConfigResult};
use approval_core::paths::resolve_against;
use approval_core::{ApprovalRequest, BuildConfiguration, CoreError, DEFAULT_ARTIFACT_EXTENSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File name of the mismatch log, relative to the source root.
pub const DEFAULT_MISMATCH_LOG: &str = "api-approval-mismatches.jsonl";

/// One component and the platform variants it is built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseConfig {
    pub component: String,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Directory that owns `ApprovedApi/`.
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Defaults to `<source_root>/../../Artifacts`.
    #[serde(default)]
    pub artifacts_root: Option<PathBuf>,

    /// Build configuration label; derived from the running executable when unset.
    #[serde(default)]
    pub configuration: Option<String>,

    #[serde(default = "default_extension")]
    pub artifact_extension: String,

    /// Reporter name, used when neither the command line nor the environment names one.
    #[serde(default)]
    pub reporter: Option<String>,

    #[serde(default)]
    pub mismatch_log: Option<PathBuf>,

    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    DEFAULT_ARTIFACT_EXTENSION.to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::for_source_root(default_source_root())
    }
}

impl HarnessConfig {
    /// A configuration with no cases, for one-off runs from the command line.
    pub fn for_source_root(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            artifacts_root: None,
            configuration: None,
            artifact_extension: default_extension(),
            reporter: None,
            mismatch_log: None,
            cases: Vec::new(),
        }
    }

    pub fn artifacts_root(&self) -> PathBuf {
        match &self.artifacts_root {
            Some(root) => root.clone(),
            None => resolve_against(&self.source_root, Path::new("../../Artifacts")),
        }
    }

    pub fn mismatch_log(&self) -> PathBuf {
        match &self.mismatch_log {
            Some(path) => path.clone(),
            None => self.source_root.join(DEFAULT_MISMATCH_LOG),
        }
    }

    /// The configured label, else the cargo profile the running binary was built in.
    pub fn build_configuration(&self) -> ConfigResult<BuildConfiguration> {
        if let Some(label) = &self.configuration {
            return Ok(BuildConfiguration::new(label.clone()));
        }
        let exe = std::env::current_exe()
            .map_err(|e| CoreError::io("<current executable>", e))?;
        self.build_configuration_for(&exe)
    }

    pub fn build_configuration_for(&self, executable: &Path) -> ConfigResult<BuildConfiguration> {
        match &self.configuration {
            Some(label) => Ok(BuildConfiguration::new(label.clone())),
            None => BuildConfiguration::from_cargo_layout(executable).map_err(|_| {
                ConfigError::Validation(format!(
                    "cannot derive the build configuration from {}; set `configuration` or pass --configuration",
                    executable.display()
                ))
            }),
        }
    }

    /// Anchors every relative path at `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        self.source_root = resolve_against(base, &self.source_root);
        if let Some(root) = self.artifacts_root.take() {
            self.artifacts_root = Some(resolve_against(base, &root));
        }
        if let Some(log) = self.mismatch_log.take() {
            self.mismatch_log = Some(resolve_against(base, &log));
        }
    }

    /// Checks the case matrix: no blank names, no duplicates. An empty matrix
    /// is valid; single-case runs name their case on the command line.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.artifact_extension.trim().is_empty() {
            return Err(ConfigError::Validation(
                "artifact_extension must not be empty".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for case in &self.cases {
            if case.component.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "case with empty component name".to_string(),
                ));
            }
            if case.variants.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "component '{}' lists no variants",
                    case.component
                )));
            }
            for variant in &case.variants {
                if variant.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "component '{}' has an empty variant",
                        case.component
                    )));
                }
                if !seen.insert((case.component.as_str(), variant.as_str())) {
                    return Err(ConfigError::Validation(format!(
                        "duplicate case {}/{}",
                        case.component, variant
                    )));
                }
            }
        }
        Ok(())
    }

    /// Expands the matrix into requests, sorted by (component, variant).
    pub fn requests(&self) -> ConfigResult<Vec<ApprovalRequest>> {
        let mut requests = self
            .cases
            .iter()
            .flat_map(|case| {
                case.variants
                    .iter()
                    .map(move |variant| ApprovalRequest::new(case.component.as_str(), variant.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        requests.sort();
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HarnessConfig {
        let mut config = HarnessConfig::for_source_root("/repo/tests/Api");
        config.cases = vec![
            CaseConfig {
                component: "Widget".into(),
                variants: vec!["v2".into(), "v1".into()],
            },
            CaseConfig {
                component: "Gadget".into(),
                variants: vec!["v1".into()],
            },
        ];
        config
    }

    #[test]
    fn test_default_artifacts_root_is_two_levels_up() {
        assert_eq!(sample().artifacts_root(), PathBuf::from("/repo/Artifacts"));
    }

    #[test]
    fn test_requests_sorted() {
        let requests: Vec<String> = sample()
            .requests()
            .unwrap()
            .iter()
            .map(|r| r.to_string())
            .collect();
        assert_eq!(requests, vec!["Gadget/v1", "Widget/v1", "Widget/v2"]);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = sample();
        config.cases.push(CaseConfig {
            component: "Widget".into(),
            variants: vec!["v1".into()],
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate case Widget/v1"));
    }

    #[test]
    fn test_validate_accepts_empty_matrix_rejects_blank_names() {
        HarnessConfig::for_source_root("/r").validate().unwrap();

        let mut config = sample();
        config.cases[0].variants.push(" ".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_from_cargo_binary_path() {
        let config = HarnessConfig::for_source_root("/repo/tests");
        let label = config
            .build_configuration_for(Path::new("/repo/target/debug/api-approval"))
            .unwrap();
        assert_eq!(label.as_str(), "debug");

        let err = config
            .build_configuration_for(Path::new("/home/u/.cargo/bin/api-approval"))
            .unwrap_err();
        assert!(err.to_string().contains("--configuration"));
    }

    #[test]
    fn test_explicit_configuration_wins_over_binary_path() {
        let mut config = HarnessConfig::for_source_root("/repo/tests");
        config.configuration = Some("Release".into());
        let label = config
            .build_configuration_for(Path::new("/home/u/.cargo/bin/api-approval"))
            .unwrap();
        assert_eq!(label.as_str(), "Release");
    }

    #[test]
    fn test_resolve_paths_against_base() {
        let mut config = HarnessConfig::for_source_root("tests/Api");
        config.artifacts_root = Some(PathBuf::from("../out"));
        config.resolve_paths(Path::new("/repo"));
        assert_eq!(config.source_root, PathBuf::from("/repo/tests/Api"));
        assert_eq!(config.artifacts_root(), PathBuf::from("/out"));
        assert_eq!(
            config.mismatch_log(),
            PathBuf::from("/repo/tests/Api").join(DEFAULT_MISMATCH_LOG)
        );
    }
}
