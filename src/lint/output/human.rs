//! Human-readable output formatter.
//!
//! Formats validation reports for terminal display with optional color support.

use super::LintFormatter;
use crate::lint::{Diagnostic, FileReport, Severity};
use console::style;
use std::io::Write;

/// Formats lint output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_prefix(&self, severity: Severity) -> String {
        let label = severity.to_string();
        if !self.use_color {
            return label;
        }
        match severity {
            Severity::Info => style(label).cyan().to_string(),
            Severity::Warning => style(label).yellow().bold().to_string(),
            Severity::Error => style(label).red().bold().to_string(),
        }
    }

    fn write_diagnostic<W: Write>(
        &self,
        report: &FileReport,
        diag: &Diagnostic,
        writer: &mut W,
    ) -> std::io::Result<()> {
        // Header line: warning[rule-id]: message
        writeln!(
            writer,
            "{}[{}]: {}",
            self.severity_prefix(diag.severity),
            diag.rule_id,
            diag.message
        )?;

        match diag.line {
            Some(line) => writeln!(writer, "  --> {}:{}", report.path.display(), line)?,
            None => writeln!(writer, "  --> {}", report.path.display())?,
        }

        if let Some(ref suggestion) = diag.suggestion {
            writeln!(writer, "   = help: {}", suggestion)?;
        }

        writeln!(writer)
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(&self, reports: &[FileReport], writer: &mut W) -> std::io::Result<()> {
        let mut errors = 0;
        let mut warnings = 0;

        for report in reports {
            // Errors first, then warnings and infos, each in discovery order
            for diag in report.result.diagnostics() {
                self.write_diagnostic(report, diag, writer)?;
            }
            errors += report.result.summary.error_count;
            warnings += report.result.summary.warning_count;
        }

        writeln!(
            writer,
            "Checked {} file(s): {} error(s), {} warning(s)",
            reports.len(),
            errors,
            warnings
        )?;

        Ok(())
    }
}
