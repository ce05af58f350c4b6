//! Validation results.
//!
//! A [`ValidationResult`] accumulates diagnostics in discovery order and
//! keeps its [`Summary`] in step with them. Diagnostics are only ever
//! appended, never removed or reordered.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::diagnostic::{Category, Diagnostic};
use super::rule::{RuleId, Severity};
use crate::error::LintError;

/// Rule id used for artifacts that could not be read.
pub const FILE_ACCESS_RULE: &str = "config.file_access";

/// Running counts for a validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Parsed items (instructions, targets and variables, entries, leaves).
    pub total_properties: usize,
    /// Items that carry no Error.
    pub valid_properties: usize,
    /// Number of Error diagnostics.
    pub error_count: usize,
    /// Number of Warning and Info diagnostics.
    pub warning_count: usize,
    /// Errors raised because a required element is absent.
    pub missing_required: usize,
}

/// Outcome of validating one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True while no Error has been recorded.
    pub valid: bool,
    /// Error diagnostics, in discovery order.
    pub errors: Vec<Diagnostic>,
    /// Warning and Info diagnostics, in discovery order.
    pub warnings: Vec<Diagnostic>,
    /// Counts.
    pub summary: Summary,
}

impl ValidationResult {
    /// Create an empty, valid result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Result for an artifact that could not be read.
    pub fn read_failure(path: &Path, err: &LintError) -> Self {
        let mut result = Self::new();
        result.push(
            Diagnostic::new(
                RuleId::new(FILE_ACCESS_RULE),
                Severity::Error,
                Category::ReadError,
                format!("Cannot read file: {}", err),
            )
            .with_field("file")
            .with_value(path.display().to_string())
            .with_suggestion("Check that the file exists, is readable and lies inside the project"),
        );
        result
    }

    /// Append a diagnostic, routing it by severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                self.valid = false;
                self.summary.error_count += 1;
                self.errors.push(diagnostic);
            }
            Severity::Warning | Severity::Info => {
                self.summary.warning_count += 1;
                self.warnings.push(diagnostic);
            }
        }
    }

    /// Append a diagnostic for a missing required element.
    pub fn push_missing_required(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Error {
            self.summary.missing_required += 1;
        }
        self.push(diagnostic);
    }

    /// Append several diagnostics in order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    /// Record the parsed items by their source lines.
    ///
    /// Items without a line (structured leaves) count as valid unless the
    /// result holds an Error with no line either.
    pub fn tally<I>(&mut self, item_lines: I)
    where
        I: IntoIterator<Item = Option<usize>>,
    {
        let error_lines: HashSet<Option<usize>> = self.errors.iter().map(|d| d.line).collect();
        let mut total = 0;
        let mut valid = 0;
        for line in item_lines {
            total += 1;
            if !error_lines.contains(&line) {
                valid += 1;
            }
        }
        self.summary.total_properties = total;
        self.summary.valid_properties = valid;
    }

    /// All diagnostics, errors first.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Diagnostics with exactly this severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics().filter(move |d| d.severity == severity)
    }

    /// Whether any diagnostic came from the given rule.
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.diagnostics().any(|d| d.rule_id.as_str() == rule_id)
    }

    /// Number of diagnostics produced by the given rule.
    pub fn count_rule(&self, rule_id: &str) -> usize {
        self.diagnostics()
            .filter(|d| d.rule_id.as_str() == rule_id)
            .count()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of validating one file, as handed to formatters.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path as given by the caller.
    pub path: PathBuf,
    /// Detected or requested format name.
    pub kind: String,
    /// Validation outcome.
    #[serde(flatten)]
    pub result: ValidationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(severity: Severity) -> Diagnostic {
        Diagnostic::new(RuleId::new("test"), severity, Category::Style, "msg")
    }

    #[test]
    fn new_result_is_valid_and_empty() {
        let result = ValidationResult::new();
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.summary, Summary::default());
    }

    #[test]
    fn errors_invalidate_and_count() {
        let mut result = ValidationResult::new();
        result.push(diag(Severity::Error));

        assert!(!result.valid);
        assert_eq!(result.summary.error_count, 1);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn info_goes_to_warnings() {
        let mut result = ValidationResult::new();
        result.push(diag(Severity::Info));
        result.push(diag(Severity::Warning));

        assert!(result.valid);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.summary.warning_count, 2);
        assert_eq!(result.summary.error_count, 0);
    }

    #[test]
    fn missing_required_counts_only_errors() {
        let mut result = ValidationResult::new();
        result.push_missing_required(diag(Severity::Error));
        result.push_missing_required(diag(Severity::Warning));

        assert_eq!(result.summary.missing_required, 1);
        assert_eq!(result.summary.error_count, 1);
        assert_eq!(result.summary.warning_count, 1);
    }

    #[test]
    fn order_is_preserved() {
        let mut result = ValidationResult::new();
        result.extend(vec![
            diag(Severity::Warning).with_field("a"),
            diag(Severity::Info).with_field("b"),
            diag(Severity::Warning).with_field("c"),
        ]);

        let fields: Vec<_> = result.warnings.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn tally_excludes_lines_with_errors() {
        let mut result = ValidationResult::new();
        result.push(diag(Severity::Error).at_line(2));
        result.push(diag(Severity::Warning).at_line(3));
        result.tally(vec![Some(1), Some(2), Some(3)]);

        assert_eq!(result.summary.total_properties, 3);
        assert_eq!(result.summary.valid_properties, 2);
    }

    #[test]
    fn read_failure_is_single_error() {
        let err = LintError::PathViolation {
            path: PathBuf::from("/etc/passwd"),
        };
        let result = ValidationResult::read_failure(Path::new("/etc/passwd"), &err);

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].rule_id.as_str(), FILE_ACCESS_RULE);
        assert_eq!(result.errors[0].category, Category::ReadError);
        assert_eq!(result.errors[0].value, "/etc/passwd");
    }

    #[test]
    fn rule_queries() {
        let mut result = ValidationResult::new();
        result.push(diag(Severity::Warning));
        result.push(diag(Severity::Error));

        assert!(result.has_rule("test"));
        assert_eq!(result.count_rule("test"), 2);
        assert!(!result.has_rule("other"));
        assert_eq!(result.with_severity(Severity::Error).count(), 1);
    }
}
