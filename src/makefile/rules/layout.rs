//! Whitespace and line layout rules.

use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};
use crate::makefile::parser::Makefile;

/// Lines longer than this many characters are reported.
pub const MAX_LINE_LENGTH: usize = 120;

pub struct LineLengthRule;

impl LintRule<Makefile> for LineLengthRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.line_length")
    }

    fn description(&self) -> &str {
        "Notes lines longer than 120 characters"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        makefile
            .lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let length = line.chars().count();
                (length > MAX_LINE_LENGTH).then(|| {
                    self.diagnostic(format!(
                        "Line is {} characters long (limit {})",
                        length, MAX_LINE_LENGTH
                    ))
                    .with_field("line")
                    .with_value(line.as_str())
                    .with_suggestion("Split it with a trailing backslash")
                    .at_line(index + 1)
                })
            })
            .collect()
    }
}

/// Lines that hold only whitespace count as blank lines and are not
/// flagged, so a file of blank lines and comments stays clean.
pub struct TrailingWhitespaceRule;

impl LintRule<Makefile> for TrailingWhitespaceRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.trailing_whitespace")
    }

    fn description(&self) -> &str {
        "Flags lines ending in whitespace"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        makefile
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty() && line.trim_end().len() != line.len())
            .map(|(index, line)| {
                self.diagnostic("Line has trailing whitespace")
                    .with_field("line")
                    .with_value(line.as_str())
                    .with_suggestion("Remove it; in variable values it becomes part of the value")
                    .at_line(index + 1)
            })
            .collect()
    }
}

/// make only accepts tabs before recipe commands.
pub struct TabIndentationRule;

impl LintRule<Makefile> for TabIndentationRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.tab_indentation")
    }

    fn description(&self) -> &str {
        "Requires recipe lines to be indented with a tab"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::Format
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for target in &makefile.targets {
            for recipe in target.recipe_lines.iter().filter(|r| r.space_indented) {
                diagnostics.push(
                    self.diagnostic(format!(
                        "Recipe line for '{}' is indented with spaces",
                        target.name
                    ))
                    .with_field(&target.name)
                    .with_value(&recipe.text)
                    .with_suggestion("Indent recipe lines with a single tab")
                    .at_line(recipe.line),
                );
            }
        }
        diagnostics
    }
}
