//! Lint rule definitions.
//!
//! This module provides the core traits and types for defining lint rules:
//!
//! - [`LintRule`] - The trait that every catalog entry implements
//! - [`RuleId`] - Stable identifier tracing a diagnostic to one check
//! - [`Severity`] - Severity level for diagnostics (Info, Warning, Error)

use serde::Serialize;

use super::diagnostic::{Category, Diagnostic};

/// Unique identifier for a lint rule, e.g. `dockerfile.from_required`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The rule id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for lint diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational suggestion, does not affect validity.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that makes the artifact invalid.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A lint rule that checks one parsed model `M`.
///
/// Rules are stateless once constructed: any pattern tables they need are
/// built in their constructor and only read from `check`. A rule never
/// fails; it returns the diagnostics it found, possibly none.
pub trait LintRule<M>: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> RuleId;

    /// Description of what this rule checks.
    fn description(&self) -> &str;

    /// Default severity for this rule.
    fn default_severity(&self) -> Severity;

    /// Category of the findings this rule reports.
    fn category(&self) -> Category;

    /// Check the model and return any diagnostics.
    fn check(&self, model: &M) -> Vec<Diagnostic>;

    /// Whether an Error from this rule means a required element is missing.
    fn reports_missing_required(&self) -> bool {
        false
    }

    /// Start a diagnostic pre-filled with this rule's id, severity and category.
    fn diagnostic(&self, message: impl Into<String>) -> Diagnostic
    where
        Self: Sized,
    {
        Diagnostic::new(
            self.id(),
            self.default_severity(),
            self.category(),
            message,
        )
    }
}
