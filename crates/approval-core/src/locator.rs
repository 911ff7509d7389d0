//! Artifact location: `<artifacts_root>/<configuration>/<variant>/<component>.<ext>`.

use crate::error::{CoreError, CoreResult};
use crate::paths::{absolutize, normalize_lexically};
use crate::types::ApprovalRequest;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_ARTIFACT_EXTENSION: &str = "json";

/// Build configuration label such as `debug` or `release`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildConfiguration(String);

impl BuildConfiguration {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Takes the name of the parent of the directory that contains `executable`.
    ///
    /// A test binary at `target/debug/deps/approval-1a2b` yields `debug`.
    pub fn from_executable(executable: &Path) -> CoreResult<Self> {
        executable
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .map(Self::new)
            .ok_or_else(|| CoreError::UnknownConfiguration(executable.to_path_buf()))
    }

    /// Reads the profile out of a cargo `target/` tree.
    ///
    /// Test binaries live in `target/<profile>/deps/`, installed-from-source
    /// binaries directly in `target/[<triple>/]<profile>/`. Anything outside a
    /// `target/` directory (e.g. `~/.cargo/bin`) has no profile to derive.
    pub fn from_cargo_layout(executable: &Path) -> CoreResult<Self> {
        let unknown = || CoreError::UnknownConfiguration(executable.to_path_buf());
        let mut dir = executable.parent().ok_or_else(unknown)?;
        if dir.file_name().is_some_and(|name| name == "deps") {
            dir = dir.parent().ok_or_else(unknown)?;
        }
        let in_target = dir
            .ancestors()
            .skip(1)
            .any(|ancestor| ancestor.file_name().is_some_and(|name| name == "target"));
        if !in_target {
            return Err(unknown());
        }
        dir.file_name()
            .and_then(|name| name.to_str())
            .map(Self::new)
            .ok_or_else(unknown)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pure path composition for built artifacts. Performs no existence check.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    root: PathBuf,
    configuration: BuildConfiguration,
    extension: String,
}

impl ArtifactLocator {
    /// Creates a locator; a relative `artifacts_root` is anchored once, here.
    pub fn new(artifacts_root: impl AsRef<Path>, configuration: BuildConfiguration) -> CoreResult<Self> {
        Ok(Self {
            root: absolutize(artifacts_root.as_ref())?,
            configuration,
            extension: DEFAULT_ARTIFACT_EXTENSION.to_string(),
        })
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn locate(&self, request: &ApprovalRequest) -> PathBuf {
        let file_name = format!("{}.{}", request.component(), self.extension);
        let path = normalize_lexically(
            &self
                .root
                .join(self.configuration.as_str())
                .join(request.variant())
                .join(file_name),
        );
        debug!(request = %request, path = %path.display(), "located artifact");
        path
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn configuration(&self) -> &BuildConfiguration {
        &self.configuration
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}
