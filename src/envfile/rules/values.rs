//! Value shape rules.

use crate::envfile::parser::EnvFile;
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};

use super::keys::at_assignment;

/// Values that read as booleans but are not `true`/`false`.
pub const BOOLEAN_WORDS: &[&str] = &["yes", "no", "on", "off", "enabled", "disabled", "y", "n"];

/// Key fragments whose values should stay strings even when numeric.
pub const STRING_KEY_HINTS: &[&str] = &["version", "id", "code", "zip", "postal"];

pub struct UnquotedSpaceRule;

impl LintRule<EnvFile> for UnquotedSpaceRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.unquoted_space")
    }

    fn description(&self) -> &str {
        "Requires quotes around values containing spaces"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Format
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| !a.is_quoted() && a.raw_value.contains(char::is_whitespace))
            .map(|a| {
                at_assignment(self, &a, format!("Value of '{}' contains spaces but is not quoted", a.key))
                    .with_suggestion(format!("{}=\"{}\"", a.key, a.raw_value))
            })
            .collect()
    }
}

pub struct EmptyValueRule;

impl LintRule<EnvFile> for EmptyValueRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.empty_value")
    }

    fn description(&self) -> &str {
        "Notes keys with empty values"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| a.value().is_empty())
            .map(|a| {
                at_assignment(self, &a, format!("Variable '{}' has an empty value", a.key))
                    .with_suggestion("Set a value or remove the line")
            })
            .collect()
    }
}

pub struct BooleanValueRule;

impl LintRule<EnvFile> for BooleanValueRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.boolean_value")
    }

    fn description(&self) -> &str {
        "Suggests true/false over yes/no style booleans"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| BOOLEAN_WORDS.contains(&a.value().to_lowercase().as_str()))
            .map(|a| {
                at_assignment(
                    self,
                    &a,
                    format!("Variable '{}' uses '{}' as a boolean", a.key, a.value()),
                )
                .with_suggestion("Use true or false")
            })
            .collect()
    }
}

/// Leading zeros and long ids get mangled when parsed as numbers.
pub struct NumericStringRule;

impl LintRule<EnvFile> for NumericStringRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.numeric_string")
    }

    fn description(&self) -> &str {
        "Suggests quoting numeric ids, versions and codes"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| !a.is_quoted() && a.raw_value.starts_with(|c: char| c.is_ascii_digit()))
            .filter(|a| a.raw_value.chars().all(|c| c.is_ascii_digit() || c == '.'))
            .filter(|a| {
                let key = a.key.to_lowercase();
                STRING_KEY_HINTS.iter().any(|hint| key.contains(hint))
            })
            .map(|a| {
                at_assignment(self, &a, format!("Variable '{}' holds a number that should stay a string", a.key))
                    .with_suggestion(format!("{}=\"{}\"", a.key, a.raw_value))
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
    fn unquoted_spaces() {
        let diagnostics = check(UnquotedSpaceRule, "A=hello world\nB=\"hello world\"\nC=single\n");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, "A");
        assert_eq!(diagnostics[0].suggestion.as_deref(), Some("A=\"hello world\""));
    }

    #[test]
    fn empty_and_empty_quoted_values() {
        let diagnostics = check(EmptyValueRule, "A=\nB=\"\"\nC=''\nD=x\n");

        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Info));
    }

    #[test]
    fn boolean_words_any_case() {
        let diagnostics = check(BooleanValueRule, "A=yes\nB=\"Off\"\nC=true\nD=Enabled\nE=nope\n");
        let fields: Vec<_> = diagnostics.iter().map(|d| d.field.as_str()).collect();

        assert_eq!(fields, vec!["A", "B", "D"]);
    }

    #[test]
    fn numeric_strings() {
        let diagnostics = check(
            NumericStringRule,
            "APP_VERSION=1.2\nZIP_CODE=01234\nCLIENT_ID=\"42\"\nPORT=8080\nRETRIES=3\n",
        );
        let fields: Vec<_> = diagnostics.iter().map(|d| d.field.as_str()).collect();

        assert_eq!(fields, vec!["APP_VERSION", "ZIP_CODE"]);
    }
}
