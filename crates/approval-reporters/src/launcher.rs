use crate::error::{ReporterError, ReporterResult};
use crate::reporter::Reporter;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Opens the received file with the desktop's default handler.
///
/// The platform openers hand the file to the desktop and exit at once, so
/// the child is waited on and never left behind.
#[derive(Debug, Clone)]
pub struct FileLauncherReporter {
    program: String,
    args: Vec<String>,
}

impl FileLauncherReporter {
    pub const NAME: &'static str = "ApprovalTests.Reporters.FileLauncherReporter";

    /// Uses `program args... <received>` instead of the platform opener.
    pub fn with_opener(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Default for FileLauncherReporter {
    fn default() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("open", &[])
        } else if cfg!(windows) {
            ("cmd", &["/C", "start", ""])
        } else {
            ("xdg-open", &[])
        };
        Self::with_opener(program, args.iter().map(|a| a.to_string()).collect())
    }
}

impl Reporter for FileLauncherReporter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn report(&self, received: &Path, _approved: &Path) -> ReporterResult<()> {
        debug!(program = %self.program, file = %received.display(), "opening received file");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(received)
            .status()
            .map_err(|source| ReporterError::Launch {
                tool: self.program.clone(),
                source,
            })?;
        debug!(program = %self.program, %status, "opener exited");
        Ok(())
    }
}
