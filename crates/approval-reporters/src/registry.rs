//! Static reporter registry with name normalization.
//!
//! Reporter names are matched the way users type them: `Diff`,
//! `DiffReporter` and `ApprovalTests.Reporters.DiffReporter` all select the
//! same reporter, case-insensitively.

use crate::console::ConsoleReporter;
use crate::diff::{DiffReporter, DiffToolDetector, PathDiffToolDetector};
use crate::error::{ReporterError, ReporterResult};
use crate::launcher::FileLauncherReporter;
use crate::log::LogReporter;
use crate::reporter::{CommandLineReporter, QuietReporter, Reporter};
use approval_core::ApprovalSettings;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Namespace prepended to names that carry no `.` or `::` qualifier.
pub const DEFAULT_NAMESPACE: &str = "ApprovalTests.Reporters";

/// Suffix appended to names that do not already end with it.
pub const REPORTER_SUFFIX: &str = "Reporter";

/// Turns a user-supplied reporter name into its canonical form.
///
/// Returns `None` for blank input, meaning "use the default reporter".
pub fn normalize_reporter_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut normalized = if trimmed.contains('.') || trimmed.contains("::") {
        trimmed.to_string()
    } else {
        format!("{}.{}", DEFAULT_NAMESPACE, trimmed)
    };
    if !normalized
        .to_ascii_lowercase()
        .ends_with(&REPORTER_SUFFIX.to_ascii_lowercase())
    {
        normalized.push_str(REPORTER_SUFFIX);
    }
    Some(normalized)
}

/// What factories may need to build a reporter.
#[derive(Clone)]
pub struct ReporterContext {
    /// Where `LogReporter` appends its records.
    pub mismatch_log: PathBuf,
    pub detector: Arc<dyn DiffToolDetector>,
}

impl ReporterContext {
    pub fn new(mismatch_log: impl Into<PathBuf>) -> Self {
        Self {
            mismatch_log: mismatch_log.into(),
            detector: Arc::new(PathDiffToolDetector::from_env()),
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn DiffToolDetector>) -> Self {
        self.detector = detector;
        self
    }
}

pub type ReporterFactory = fn(&ReporterContext) -> Arc<dyn Reporter>;

fn build_diff(ctx: &ReporterContext) -> Arc<dyn Reporter> {
    Arc::new(DiffReporter::new(ctx.detector.clone()))
}

fn build_quiet(_: &ReporterContext) -> Arc<dyn Reporter> {
    Arc::new(QuietReporter)
}

fn build_console(_: &ReporterContext) -> Arc<dyn Reporter> {
    Arc::new(ConsoleReporter)
}

fn build_log(ctx: &ReporterContext) -> Arc<dyn Reporter> {
    Arc::new(LogReporter::new(ctx.mismatch_log.clone()))
}

fn build_file_launcher(_: &ReporterContext) -> Arc<dyn Reporter> {
    Arc::new(FileLauncherReporter::default())
}

fn build_command_line(_: &ReporterContext) -> Arc<dyn Reporter> {
    Arc::new(CommandLineReporter)
}

/// Name → factory table. Populated once; lookups never mutate it.
pub struct ReporterRegistry {
    factories: HashMap<String, (String, ReporterFactory)>,
    context: ReporterContext,
}

impl ReporterRegistry {
    /// An empty registry.
    pub fn new(context: ReporterContext) -> Self {
        Self {
            factories: HashMap::new(),
            context,
        }
    }

    /// A registry with every built-in reporter.
    pub fn with_builtin(context: ReporterContext) -> Self {
        let mut registry = Self::new(context);
        register_builtin(&mut registry);
        registry
    }

    /// Registers a factory under its canonical name, replacing any previous one.
    pub fn register(&mut self, canonical: &str, factory: ReporterFactory) {
        debug!(reporter = canonical, "registering reporter");
        self.factories.insert(
            canonical.to_ascii_lowercase(),
            (canonical.to_string(), factory),
        );
    }

    /// Canonical names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .factories
            .values()
            .map(|(canonical, _)| canonical.clone())
            .collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        normalize_reporter_name(name)
            .map(|n| self.factories.contains_key(&n.to_ascii_lowercase()))
            .unwrap_or(false)
    }

    /// Builds the reporter registered under `name`.
    ///
    /// A blank name yields the default reporter.
    pub fn get(&self, name: &str) -> ReporterResult<Arc<dyn Reporter>> {
        let Some(normalized) = normalize_reporter_name(name) else {
            return Ok(self.default_reporter());
        };
        match self.factories.get(&normalized.to_ascii_lowercase()) {
            Some((_, factory)) => Ok(factory(&self.context)),
            None => Err(ReporterError::UnknownReporter {
                requested: name.to_string(),
                normalized,
                known: self.names(),
            }),
        }
    }

    /// The interactive diff reporter.
    pub fn default_reporter(&self) -> Arc<dyn Reporter> {
        build_diff(&self.context)
    }

    /// Picks the reporter for a run: the settings override when present,
    /// the default otherwise.
    pub fn resolve(&self, settings: &ApprovalSettings) -> ReporterResult<Arc<dyn Reporter>> {
        let reporter = match settings.reporter_override() {
            Some(name) => self.get(name)?,
            None => self.default_reporter(),
        };
        info!(reporter = reporter.name(), "reporter selected");
        Ok(reporter)
    }
}

fn register_builtin(registry: &mut ReporterRegistry) {
    registry.register(DiffReporter::NAME, build_diff);
    registry.register(QuietReporter::NAME, build_quiet);
    registry.register(ConsoleReporter::NAME, build_console);
    registry.register(LogReporter::NAME, build_log);
    registry.register(FileLauncherReporter::NAME, build_file_launcher);
    registry.register(CommandLineReporter::NAME, build_command_line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_short_name() {
        assert_eq!(
            normalize_reporter_name("Diff").as_deref(),
            Some("ApprovalTests.Reporters.DiffReporter")
        );
        assert_eq!(
            normalize_reporter_name("  QuietReporter ").as_deref(),
            Some("ApprovalTests.Reporters.QuietReporter")
        );
    }

    #[test]
    fn test_normalize_keeps_qualified_name() {
        assert_eq!(
            normalize_reporter_name("ApprovalTests.Reporters.DiffReporter").as_deref(),
            Some("ApprovalTests.Reporters.DiffReporter")
        );
        assert_eq!(
            normalize_reporter_name("My.Custom").as_deref(),
            Some("My.CustomReporter")
        );
    }

    #[test]
    fn test_normalize_suffix_is_case_insensitive() {
        assert_eq!(
            normalize_reporter_name("quietreporter").as_deref(),
            Some("ApprovalTests.Reporters.quietreporter")
        );
    }

    #[test]
    fn test_normalize_blank_is_none() {
        assert_eq!(normalize_reporter_name(""), None);
        assert_eq!(normalize_reporter_name("   "), None);
    }

    #[test]
    fn test_builtin_names_sorted() {
        let registry = ReporterRegistry::with_builtin(ReporterContext::new("m.jsonl"));
        assert_eq!(
            registry.names(),
            vec![
                "ApprovalTests.Reporters.CommandLineReporter",
                "ApprovalTests.Reporters.ConsoleReporter",
                "ApprovalTests.Reporters.DiffReporter",
                "ApprovalTests.Reporters.FileLauncherReporter",
                "ApprovalTests.Reporters.LogReporter",
                "ApprovalTests.Reporters.QuietReporter",
            ]
        );
    }
}
