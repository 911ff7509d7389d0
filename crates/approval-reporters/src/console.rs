//! Line diff of approved vs received, printed to stderr.

use crate::error::{ReporterError, ReporterResult};
use crate::reporter::Reporter;
use colored::Colorize;
use difference::{Changeset, Difference};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub const NAME: &'static str = "ApprovalTests.Reporters.ConsoleReporter";

    /// Renders a plain line diff: `- ` for approved-only lines, `+ ` for
    /// received-only lines, two spaces for shared lines.
    pub fn render_diff(approved: &str, received: &str) -> String {
        let mut out = String::new();
        for (marker, line) in diff_lines(approved, received) {
            out.push_str(marker);
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

fn diff_lines(approved: &str, received: &str) -> Vec<(&'static str, String)> {
    let changeset = Changeset::new(
        approved.trim_end_matches('\n'),
        received.trim_end_matches('\n'),
        "\n",
    );
    let mut lines = Vec::new();
    for diff in changeset.diffs {
        let (marker, chunk) = match diff {
            Difference::Same(chunk) => ("  ", chunk),
            Difference::Add(chunk) => ("+ ", chunk),
            Difference::Rem(chunk) => ("- ", chunk),
        };
        for line in chunk.split('\n') {
            lines.push((marker, line.to_string()));
        }
    }
    lines
}

fn read_or_empty(path: &Path) -> ReporterResult<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(ReporterError::io(path, e)),
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn report(&self, received: &Path, approved: &Path) -> ReporterResult<()> {
        let approved_text = read_or_empty(approved)?;
        let received_text = read_or_empty(received)?;

        eprintln!("{}", format!("--- {}", approved.display()).red());
        eprintln!("{}", format!("+++ {}", received.display()).green());
        for (marker, line) in diff_lines(&approved_text, &received_text) {
            let text = format!("{}{}", marker, line);
            match marker {
                "+ " => eprintln!("{}", text.green()),
                "- " => eprintln!("{}", text.red()),
                _ => eprintln!("{}", text.dimmed()),
            }
        }
        Ok(())
    }
}
