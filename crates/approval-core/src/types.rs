use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One approval case: a component checked against one platform variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApprovalRequest {
    component: String,
    variant: String,
}

impl ApprovalRequest {
    /// Builds a request, rejecting empty or whitespace-only identifiers.
    pub fn new(component: impl Into<String>, variant: impl Into<String>) -> CoreResult<Self> {
        let component = component.into();
        let variant = variant.into();
        if component.trim().is_empty() {
            return Err(CoreError::invalid_request("component name must not be empty"));
        }
        if variant.trim().is_empty() {
            return Err(CoreError::invalid_request(format!(
                "platform variant for '{}' must not be empty",
                component
            )));
        }
        Ok(Self { component, variant })
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }
}

impl fmt::Display for ApprovalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.component, self.variant)
    }
}

/// Freshly rendered public surface of a component.
///
/// Equality against a baseline is line-by-line, so `\r\n` and `\n` line endings
/// and a missing final newline compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateText(String);

impl CandidateText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Joins lines with `\n`, terminating a non-empty text with a final newline.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Exact line-by-line comparison against stored baseline content.
    pub fn matches(&self, baseline: &str) -> bool {
        self.0.lines().eq(baseline.lines())
    }

    /// 1-based number of the first line that differs from `baseline`, if any.
    pub fn first_difference(&self, baseline: &str) -> Option<usize> {
        let mut ours = self.0.lines();
        let mut theirs = baseline.lines();
        let mut line = 1;
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return None,
                (Some(a), Some(b)) if a == b => line += 1,
                _ => return Some(line),
            }
        }
    }
}

impl fmt::Display for CandidateText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CandidateText {
    fn from(text: String) -> Self {
        Self(text)
    }
}
