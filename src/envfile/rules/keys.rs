//! Line format and key naming rules.

use std::collections::HashMap;

use regex::Regex;

use crate::envfile::parser::{Assignment, EnvFile, EnvLineKind};
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};

/// Names the shell and the process environment already own.
pub const RESERVED_KEYS: &[&str] = &["PATH", "HOME", "USER", "PWD", "SHELL"];

pub(crate) fn at_assignment<R: LintRule<EnvFile>>(
    rule: &R,
    assignment: &Assignment<'_>,
    message: String,
) -> Diagnostic {
    rule.diagnostic(message)
        .with_field(assignment.key)
        .with_value(assignment.raw_value)
        .at_line(assignment.line)
}

pub struct FormatRule;

impl LintRule<EnvFile> for FormatRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.format")
    }

    fn description(&self) -> &str {
        "Requires every line to be KEY=VALUE"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::Format
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.entries
            .iter()
            .filter_map(|entry| match &entry.kind {
                EnvLineKind::Malformed { text } => Some(
                    self.diagnostic("Line must be KEY=VALUE")
                        .with_field("line")
                        .with_value(text.as_str())
                        .with_suggestion("Add '=' after the variable name or comment the line out")
                        .at_line(entry.line),
                ),
                EnvLineKind::Assignment { .. } => None,
            })
            .collect()
    }
}

/// Later assignments silently win in most loaders.
pub struct DuplicateKeyRule;

impl LintRule<EnvFile> for DuplicateKeyRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.duplicate_key")
    }

    fn description(&self) -> &str {
        "Flags keys assigned more than once"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        let mut seen: HashMap<&str, Assignment<'_>> = HashMap::new();
        let mut diagnostics = Vec::new();

        for assignment in env.assignments() {
            if let Some(previous) = seen.insert(assignment.key, assignment) {
                diagnostics.push(
                    at_assignment(
                        self,
                        &assignment,
                        format!(
                            "Duplicate key '{}' (previous value '{}' on line {})",
                            assignment.key, previous.raw_value, previous.line
                        ),
                    )
                    .with_suggestion("Remove one of the assignments"),
                );
            }
        }

        diagnostics
    }
}

pub struct KeyFormatRule {
    pattern: Regex,
}

impl KeyFormatRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("key pattern is valid"),
        }
    }
}

impl Default for KeyFormatRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule<EnvFile> for KeyFormatRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.key_format")
    }

    fn description(&self) -> &str {
        "Requires keys made of letters, digits and underscores, not starting with a digit"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Format
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| !self.pattern.is_match(a.key))
            .map(|a| {
                at_assignment(self, &a, format!("Key '{}' is not a valid variable name", a.key))
                    .with_suggestion("Start with a letter or underscore and use only A-Z, 0-9 and _")
            })
            .collect()
    }
}

pub struct KeyCaseRule;

impl LintRule<EnvFile> for KeyCaseRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.key_case")
    }

    fn description(&self) -> &str {
        "Recommends upper-case keys"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| a.key.chars().any(char::is_lowercase))
            .map(|a| {
                at_assignment(self, &a, format!("Key '{}' is not upper-case", a.key))
                    .with_suggestion(format!("Rename it to '{}'", a.key.to_uppercase()))
            })
            .collect()
    }
}

pub struct ReservedKeyRule;

impl LintRule<EnvFile> for ReservedKeyRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.reserved_key")
    }

    fn description(&self) -> &str {
        "Flags keys that override PATH, HOME, USER, PWD or SHELL"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| RESERVED_KEYS.contains(&a.key))
            .map(|a| {
                at_assignment(self, &a, format!("Key '{}' overrides a system variable", a.key))
                    .with_suggestion(format!("Use an application prefix, e.g. APP_{}", a.key))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<R: LintRule<EnvFile>>(rule: R, content: &str) -> Vec<Diagnostic> {
        rule.check(&EnvFile::parse(content))
    }

    #[test]
    fn malformed_lines_are_errors() {
        let diagnostics = check(FormatRule, "GOOD=1\nnot an assignment\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].line, Some(2));
        assert_eq!(diagnostics[0].value, "not an assignment");
    }

    #[test]
    fn duplicate_key_mentions_previous_value() {
        let diagnostics = check(DuplicateKeyRule, "PORT=3000\nHOST=x\nPORT=4000\nPORT=5000\n");

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].line, Some(3));
        assert!(diagnostics[0].message.contains("'3000'"));
        assert!(diagnostics[0].message.contains("line 1"));
        assert!(diagnostics[1].message.contains("'4000'"));
    }

    #[test]
    fn key_format() {
        let diagnostics = check(KeyFormatRule::new(), "1ST=a\nMY-KEY=b\n_OK=c\nfine_2=d\n");
        let fields: Vec<_> = diagnostics.iter().map(|d| d.field.as_str()).collect();

        assert_eq!(fields, vec!["1ST", "MY-KEY"]);
    }

    #[test]
    fn key_case() {
        let diagnostics = check(KeyCaseRule, "apiUrl=x\nAPI_URL=y\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].suggestion.as_deref(), Some("Rename it to 'APIURL'"));
    }

    #[test]
    fn reserved_keys() {
        let diagnostics = check(ReservedKeyRule, "PATH=/bin\nHOME_DIR=/x\nSHELL=/bin/zsh\n");
        assert_eq!(diagnostics.len(), 2);
    }
}
