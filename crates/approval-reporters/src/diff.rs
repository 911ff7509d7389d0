//! Interactive diff-tool reporter with host auto-detection.

use crate::console::ConsoleReporter;
use crate::error::{ReporterError, ReporterResult};
use crate::reporter::Reporter;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A diff tool found on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffTool {
    pub name: String,
    pub program: PathBuf,
    /// Arguments placed before the two file paths.
    pub args: Vec<String>,
}

impl DiffTool {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
        }
    }

    /// Runs the tool on (received, approved) and waits for it to exit.
    pub fn launch(&self, received: &Path, approved: &Path) -> ReporterResult<()> {
        info!(tool = %self.name, "launching diff tool");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(received)
            .arg(approved)
            .status()
            .map_err(|source| ReporterError::Launch {
                tool: self.name.clone(),
                source,
            })?;
        // Most diff tools exit non-zero when the files differ.
        debug!(tool = %self.name, status = %status, "diff tool exited");
        Ok(())
    }
}

/// Finds a usable diff tool. Detection policy lives outside the engine.
pub trait DiffToolDetector: Send + Sync {
    fn detect(&self) -> Option<DiffTool>;
}

/// Candidate tools in preference order, with their leading arguments.
const KNOWN_TOOLS: &[(&str, &[&str])] = &[
    ("code", &["--wait", "--diff"]),
    ("meld", &[]),
    ("kdiff3", &[]),
    ("bcompare", &[]),
    ("p4merge", &[]),
    ("opendiff", &[]),
    ("tkdiff", &[]),
];

/// Looks for the known tools on a search path (normally `PATH`).
#[derive(Debug, Clone)]
pub struct PathDiffToolDetector {
    search_path: Vec<PathBuf>,
}

impl PathDiffToolDetector {
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    pub fn from_env() -> Self {
        let search_path = std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self::new(search_path)
    }

    fn find(&self, program: &str) -> Option<PathBuf> {
        let file_names: Vec<String> = if cfg!(windows) {
            vec![format!("{}.exe", program), format!("{}.cmd", program)]
        } else {
            vec![program.to_string()]
        };
        self.search_path
            .iter()
            .flat_map(|dir| file_names.iter().map(move |name| dir.join(name)))
            .find(|candidate| is_executable(candidate))
    }
}

impl DiffToolDetector for PathDiffToolDetector {
    fn detect(&self) -> Option<DiffTool> {
        KNOWN_TOOLS.iter().find_map(|(name, args)| {
            self.find(name).map(|program| {
                DiffTool::new(*name, program, args.iter().map(|a| a.to_string()).collect())
            })
        })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Launches the first detected diff tool; prints a console diff when none exists.
#[derive(Clone)]
pub struct DiffReporter {
    detector: Arc<dyn DiffToolDetector>,
    fallback: ConsoleReporter,
}

impl DiffReporter {
    pub const NAME: &'static str = "ApprovalTests.Reporters.DiffReporter";

    pub fn new(detector: Arc<dyn DiffToolDetector>) -> Self {
        Self {
            detector,
            fallback: ConsoleReporter,
        }
    }
}

impl Default for DiffReporter {
    fn default() -> Self {
        Self::new(Arc::new(PathDiffToolDetector::from_env()))
    }
}

impl Reporter for DiffReporter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn report(&self, received: &Path, approved: &Path) -> ReporterResult<()> {
        let Some(tool) = self.detector.detect() else {
            warn!("no diff tool found on this host, printing the diff instead");
            return self.fallback.report(received, approved);
        };

        if approved.exists() {
            return tool.launch(received, approved);
        }

        // Tools refuse to open a missing file. Compare against an empty scratch
        // file instead: an approved baseline only ever comes from promotion.
        let dir = received.parent().unwrap_or_else(|| Path::new("."));
        let scratch = tempfile::Builder::new()
            .prefix(".empty-")
            .suffix(".txt")
            .tempfile_in(dir)
            .map_err(|e| ReporterError::io(dir, e))?;
        debug!(scratch = %scratch.path().display(), "no baseline yet, diffing against an empty file");
        tool.launch(received, scratch.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_search_path_detects_nothing() {
        assert_eq!(PathDiffToolDetector::new(vec![]).detect(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_detects_executable_in_preference_order() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        for tool in ["kdiff3", "meld"] {
            let path = dir.path().join(tool);
            fs::write(&path, "#!/bin/sh\n").unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        // Not executable, so skipped.
        fs::write(dir.path().join("code"), "").unwrap();

        let tool = PathDiffToolDetector::new(vec![dir.path().to_path_buf()])
            .detect()
            .unwrap();
        assert_eq!(tool.name, "meld");
        assert_eq!(tool.program, dir.path().join("meld"));
        assert!(tool.args.is_empty());
    }
}
