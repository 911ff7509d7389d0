//! The reporting capability and the trivial reporters.

use crate::error::ReporterResult;
use std::path::Path;

/// Presents an approval mismatch to a person or a log.
///
/// The outcome of `report` never changes whether a case passes; errors are
/// only logged by the caller.
pub trait Reporter: Send + Sync {
    /// Canonical registry name, e.g. `ApprovalTests.Reporters.QuietReporter`.
    fn name(&self) -> &'static str;

    fn report(&self, received: &Path, approved: &Path) -> ReporterResult<()>;
}

/// Does nothing. Meant for CI, where no one is watching.
#[derive(Debug, Clone, Default)]
pub struct QuietReporter;

impl QuietReporter {
    pub const NAME: &'static str = "ApprovalTests.Reporters.QuietReporter";
}

impl Reporter for QuietReporter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn report(&self, _received: &Path, _approved: &Path) -> ReporterResult<()> {
        Ok(())
    }
}

/// Prints the shell command that accepts the received file.
#[derive(Debug, Clone, Default)]
pub struct CommandLineReporter;

impl CommandLineReporter {
    pub const NAME: &'static str = "ApprovalTests.Reporters.CommandLineReporter";

    pub fn approve_command(received: &Path, approved: &Path) -> String {
        let program = if cfg!(windows) { "move /Y" } else { "mv" };
        format!(
            "{} \"{}\" \"{}\"",
            program,
            received.display(),
            approved.display()
        )
    }
}

impl Reporter for CommandLineReporter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn report(&self, received: &Path, approved: &Path) -> ReporterResult<()> {
        eprintln!("To approve, run:");
        eprintln!("    {}", Self::approve_command(received, approved));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_succeeds() {
        let reporter = QuietReporter;
        assert!(reporter
            .report(Path::new("a.received.txt"), Path::new("a.approved.txt"))
            .is_ok());
        assert_eq!(reporter.name(), "ApprovalTests.Reporters.QuietReporter");
    }

    #[cfg(unix)]
    #[test]
    fn test_approve_command_moves_received_over_approved() {
        let command = CommandLineReporter::approve_command(
            Path::new("/t/ApprovedApi/W/v1.received.txt"),
            Path::new("/t/ApprovedApi/W/v1.approved.txt"),
        );
        assert_eq!(
            command,
            "mv \"/t/ApprovedApi/W/v1.received.txt\" \"/t/ApprovedApi/W/v1.approved.txt\""
        );
    }
}
