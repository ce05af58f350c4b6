//! JSON output formatter.
//!
//! Formats validation reports as machine-readable JSON for tooling integration.

use super::LintFormatter;
use crate::lint::FileReport;
use serde::Serialize;
use std::io::Write;

/// Formats lint output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: &'a [FileReport],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    errors: usize,
    warnings: usize,
    invalid_files: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(&self, reports: &[FileReport], writer: &mut W) -> std::io::Result<()> {
        let summary = JsonSummary {
            files: reports.len(),
            errors: reports.iter().map(|r| r.result.summary.error_count).sum(),
            warnings: reports.iter().map(|r| r.result.summary.warning_count).sum(),
            invalid_files: reports.iter().filter(|r| !r.result.valid).count(),
        };

        let output = JsonOutput {
            files: reports,
            summary,
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{Category, Diagnostic, RuleId, Severity, ValidationResult};
    use std::path::PathBuf;

    fn report(path: &str, diagnostics: Vec<Diagnostic>) -> FileReport {
        let mut result = ValidationResult::new();
        result.extend(diagnostics);
        FileReport {
            path: PathBuf::from(path),
            kind: "env".to_string(),
            result,
        }
    }

    fn render(reports: &[FileReport]) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(reports, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_json() {
        let parsed = render(&[report(
            ".env",
            vec![Diagnostic::new(
                RuleId::new("env.format"),
                Severity::Error,
                Category::Format,
                "Error message",
            )],
        )]);

        assert!(parsed["files"].is_array());
        assert_eq!(parsed["files"][0]["path"], ".env");
        assert_eq!(parsed["files"][0]["valid"], false);
        assert_eq!(parsed["files"][0]["errors"][0]["rule_id"], "env.format");
        assert_eq!(parsed["files"][0]["errors"][0]["category"], "format");
        assert_eq!(parsed["summary"]["files"], 1);
    }

    #[test]
    fn includes_line_when_present() {
        let parsed = render(&[report(
            ".env",
            vec![
                Diagnostic::new(RuleId::new("t"), Severity::Warning, Category::Style, "msg")
                    .at_line(10),
            ],
        )]);

        assert_eq!(parsed["files"][0]["warnings"][0]["line"], 10);
    }

    #[test]
    fn summary_counts_across_files() {
        let parsed = render(&[
            report(
                "a.env",
                vec![
                    Diagnostic::new(RuleId::new("r1"), Severity::Error, Category::Format, "e1"),
                    Diagnostic::new(RuleId::new("r2"), Severity::Warning, Category::Style, "w1"),
                ],
            ),
            report(
                "b.env",
                vec![Diagnostic::new(
                    RuleId::new("r3"),
                    Severity::Info,
                    Category::Style,
                    "i1",
                )],
            ),
        ]);

        assert_eq!(parsed["summary"]["files"], 2);
        assert_eq!(parsed["summary"]["errors"], 1);
        assert_eq!(parsed["summary"]["warnings"], 2);
        assert_eq!(parsed["summary"]["invalid_files"], 1);
        assert_eq!(parsed["files"][0]["summary"]["error_count"], 1);
    }

    #[test]
    fn empty_run() {
        let parsed = render(&[]);
        assert_eq!(parsed["summary"]["files"], 0);
        assert!(parsed["files"].as_array().unwrap().is_empty());
    }
}
