//! Secrets baked into `ENV` and `ARG`.

use std::sync::Arc;

use crate::dockerfile::parser::{Dockerfile, Instruction};
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};
use crate::secrets::{strip_quotes, SecretDetector};

use super::flag;

/// Split whitespace-separated words, keeping quoted sections together.
fn shell_words(args: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in args.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', _) => {
                current.push(c);
                escaped = true;
            }
            ('"' | '\'', None) => {
                quote = Some(c);
                current.push(c);
            }
            (c, Some(q)) if c == q => {
                quote = None;
                current.push(c);
            }
            (c, None) if c.is_whitespace() => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `(key, value)` pairs set by an `ENV` or `ARG` instruction.
///
/// Handles `KEY=value KEY2="quoted value"` and the legacy `ENV KEY value`
/// form. An `ARG` without a default yields no pair.
pub fn assignments(instruction: &Instruction) -> Vec<(String, String)> {
    let words = shell_words(&instruction.args);
    let Some(first) = words.first() else {
        return Vec::new();
    };

    if !first.contains('=') {
        if !instruction.is("ENV") {
            return Vec::new();
        }
        let args = instruction.args.trim();
        let (key, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
        return vec![(key.to_string(), value.trim().to_string())];
    }

    words
        .iter()
        .filter_map(|word| word.split_once('='))
        .map(|(key, value)| (key.to_string(), strip_quotes(value).to_string()))
        .collect()
}

pub struct EnvSecretRule {
    detector: Arc<SecretDetector>,
}

impl EnvSecretRule {
    pub fn new(detector: Arc<SecretDetector>) -> Self {
        Self { detector }
    }
}

impl LintRule<Dockerfile> for EnvSecretRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.env_secret")
    }

    fn description(&self) -> &str {
        "Flags ENV/ARG values that look like hardcoded secrets"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for instruction in &dockerfile.instructions {
            if !instruction.is("ENV") && !instruction.is("ARG") {
                continue;
            }
            for (key, value) in assignments(instruction) {
                if self.detector.looks_like_secret(&key, &value) {
                    diagnostics.push(
                        flag(
                            self,
                            instruction,
                            format!("{} '{}' looks like a hardcoded secret", instruction.command, key),
                        )
                        .with_field(&key)
                        .with_value(&value)
                        .with_suggestion(
                            "Pass secrets at build time with --mount=type=secret or at runtime",
                        ),
                    );
                }
            }
        }
        diagnostics
    }
}
