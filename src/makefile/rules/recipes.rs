//! Recipe command rules.

use std::sync::Arc;

use regex::Regex;

use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};
use crate::makefile::parser::{Makefile, RecipeLine, Target};
use crate::shell::ShellHeuristics;

/// Bash-only syntax that fails under `/bin/sh`.
///
/// Each tuple contains (token, regex_pattern).
pub const BASHISMS: &[(&str, &str)] = &[
    ("[[", r"\[\["),
    ("function", r"(^|[\s;&|(])function\s"),
    ("source", r"(^|[\s;&|(])source\s"),
    ("declare", r"(^|[\s;&|(])declare\s"),
    ("<<<", r"<<<"),
    ("$'", r"\$'"),
    ("&>", r"&>"),
    ("${!", r"\$\{!"),
    ("=~", r"\s=~\s"),
];

fn recipe_lines(makefile: &Makefile) -> impl Iterator<Item = (&Target, &RecipeLine)> {
    makefile
        .targets
        .iter()
        .flat_map(|t| t.recipe_lines.iter().map(move |r| (t, r)))
}

fn at_recipe<R: LintRule<Makefile>>(
    rule: &R,
    target: &Target,
    recipe: &RecipeLine,
    message: String,
) -> Diagnostic {
    rule.diagnostic(message)
        .with_field(&target.name)
        .with_value(&recipe.text)
        .at_line(recipe.line)
}

pub struct DangerousCommandRule {
    shell: Arc<ShellHeuristics>,
}

impl DangerousCommandRule {
    pub fn new(shell: Arc<ShellHeuristics>) -> Self {
        Self { shell }
    }
}

impl LintRule<Makefile> for DangerousCommandRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.dangerous_command")
    }

    fn description(&self) -> &str {
        "Flags recipe commands matching the dangerous-command deny-list"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (target, recipe) in recipe_lines(makefile) {
            for pattern in self.shell.dangerous_matches(&recipe.text) {
                diagnostics.push(
                    at_recipe(
                        self,
                        target,
                        recipe,
                        format!(
                            "Recipe for '{}' uses a dangerous command: {}",
                            target.name, pattern.description
                        ),
                    )
                    .with_suggestion("Remove the command or scope it to a specific path"),
                );
            }
        }
        diagnostics
    }
}

pub struct UnverifiedDownloadRule {
    shell: Arc<ShellHeuristics>,
}

impl UnverifiedDownloadRule {
    pub fn new(shell: Arc<ShellHeuristics>) -> Self {
        Self { shell }
    }
}

impl LintRule<Makefile> for UnverifiedDownloadRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.unverified_download")
    }

    fn description(&self) -> &str {
        "Flags recipe downloads without verification"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        recipe_lines(makefile)
            .filter(|(_, recipe)| self.shell.is_unverified_download(&recipe.text))
            .map(|(target, recipe)| {
                at_recipe(
                    self,
                    target,
                    recipe,
                    format!("Recipe for '{}' downloads without verifying", target.name),
                )
                .with_suggestion("Check the download with sha256sum -c or gpg --verify")
            })
            .collect()
    }
}

/// Recipes run under `/bin/sh` unless `SHELL` says otherwise.
pub struct ShellSpecificSyntaxRule {
    bashisms: Vec<(&'static str, Regex)>,
}

impl ShellSpecificSyntaxRule {
    pub fn new() -> Self {
        let bashisms = BASHISMS
            .iter()
            .map(|(token, pattern)| {
                (*token, Regex::new(pattern).expect("builtin bashism pattern is valid"))
            })
            .collect();
        Self { bashisms }
    }
}

impl Default for ShellSpecificSyntaxRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule<Makefile> for ShellSpecificSyntaxRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.shell_specific_syntax")
    }

    fn description(&self) -> &str {
        "Flags bash-only syntax when SHELL is not bash"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        if makefile
            .variable("SHELL")
            .is_some_and(|shell| shell.value.contains("bash"))
        {
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for (target, recipe) in recipe_lines(makefile) {
            if let Some((token, _)) = self.bashisms.iter().find(|(_, re)| re.is_match(&recipe.text)) {
                diagnostics.push(
                    at_recipe(
                        self,
                        target,
                        recipe,
                        format!("Recipe for '{}' uses bash-only syntax '{}'", target.name, token),
                    )
                    .with_suggestion("Set SHELL := /bin/bash or use POSIX sh syntax"),
                );
            }
        }
        diagnostics
    }
}
