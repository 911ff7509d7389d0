//! Process-wide approval settings.
//!
//! The reporter override is read once at startup and injected into the
//! engine, so tests can supply their own value without touching the
//! process environment.

/// Environment variable naming a reporter, e.g. `Quiet` or `ConsoleReporter`.
pub const REPORTER_ENV_VAR: &str = "API_APPROVAL_REPORTER";

/// Older dotted key, still honoured when the primary variable is unset.
pub const LEGACY_REPORTER_ENV_VAR: &str = "ApiApproval.Reporter";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalSettings {
    reporter_override: Option<String>,
}

impl ApprovalSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reporter override; blank names mean "no override".
    pub fn with_reporter(mut self, name: impl Into<String>) -> Self {
        self.reporter_override = non_blank(name.into());
        self
    }

    /// Reads the override from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the override through `lookup`, primary key first.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let reporter_override = [REPORTER_ENV_VAR, LEGACY_REPORTER_ENV_VAR]
            .iter()
            .find_map(|key| lookup(key).and_then(non_blank));
        Self { reporter_override }
    }

    /// Fills the override from `fallback` when none is set yet.
    pub fn or_reporter(mut self, fallback: Option<String>) -> Self {
        if self.reporter_override.is_none() {
            self.reporter_override = fallback.and_then(non_blank);
        }
        self
    }

    pub fn reporter_override(&self) -> Option<&str> {
        self.reporter_override.as_deref()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
