//! Lint diagnostic messages.
//!
//! This module provides the [`Diagnostic`] type for representing findings
//! produced by catalog rules, with the offending field and value, a
//! category, optional remediation text and the source line it came from.

use serde::Serialize;

use super::rule::{RuleId, Severity};

/// Broad classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The artifact could not be read at all.
    ReadError,
    /// The artifact could not be parsed as its format.
    Syntax,
    /// A required or structural element is missing or malformed.
    Structure,
    /// A single line or value breaks the format's rules.
    Format,
    /// Credentials, insecure transports, dangerous commands.
    Security,
    /// Deviations from established conventions.
    BestPractice,
    /// Build or runtime cost.
    Performance,
    /// Naming, whitespace and layout.
    Style,
}

impl Category {
    /// The snake_case name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ReadError => "read_error",
            Category::Syntax => "syntax",
            Category::Structure => "structure",
            Category::Format => "format",
            Category::Security => "security",
            Category::BestPractice => "best_practice",
            Category::Performance => "performance",
            Category::Style => "style",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding produced by a lint rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic.
    pub rule_id: RuleId,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Category of the finding.
    pub category: Category,
    /// Field the finding is about (instruction verb, target, key, ...).
    pub field: String,
    /// Offending value, verbatim.
    pub value: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// 1-based source line, when the finding has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        rule_id: RuleId,
        severity: Severity,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id,
            severity,
            category,
            field: String::new(),
            value: String::new(),
            message: message.into(),
            suggestion: None,
            line: None,
        }
    }

    /// Set the field this diagnostic refers to.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Set the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Add a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the 1-based source line.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Override the rule's default severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_creation() {
        let diag = Diagnostic::new(
            RuleId::new("env.format"),
            Severity::Error,
            Category::Format,
            "Test message",
        );

        assert_eq!(diag.rule_id, RuleId::new("env.format"));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.category, Category::Format);
        assert_eq!(diag.message, "Test message");
        assert!(diag.suggestion.is_none());
        assert!(diag.line.is_none());
        assert!(diag.field.is_empty());
    }

    #[test]
    fn diagnostic_builder_pattern() {
        let diag = Diagnostic::new(
            RuleId::new("env.secret"),
            Severity::Warning,
            Category::Security,
            "Possible secret",
        )
        .with_field("API_KEY")
        .with_value("abc")
        .with_suggestion("Move it to a secret store")
        .at_line(3);

        assert_eq!(diag.field, "API_KEY");
        assert_eq!(diag.value, "abc");
        assert_eq!(diag.line, Some(3));
        assert_eq!(diag.suggestion.as_deref(), Some("Move it to a secret store"));
    }

    #[test]
    fn severity_can_be_overridden() {
        let diag = Diagnostic::new(
            RuleId::new("dockerfile.user_root"),
            Severity::Warning,
            Category::Security,
            "msg",
        )
        .with_severity(Severity::Info);

        assert_eq!(diag.severity, Severity::Info);
    }

    #[test]
    fn category_names_are_snake_case() {
        assert_eq!(Category::ReadError.to_string(), "read_error");
        assert_eq!(Category::BestPractice.to_string(), "best_practice");
        let json = serde_json::to_string(&Category::BestPractice).unwrap();
        assert_eq!(json, "\"best_practice\"");
    }

    #[test]
    fn serialization_omits_absent_optionals() {
        let diag = Diagnostic::new(
            RuleId::new("makefile.line_length"),
            Severity::Info,
            Category::Style,
            "Line too long",
        );

        let value = serde_json::to_value(&diag).unwrap();
        assert_eq!(value["rule_id"], "makefile.line_length");
        assert!(value.get("suggestion").is_none());
        assert!(value.get("line").is_none());
    }
}
