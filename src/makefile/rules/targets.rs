//! Target rules.

use std::collections::HashMap;

use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};
use crate::makefile::parser::{Makefile, Target};

/// Targets that name an action rather than a file.
pub const CONVENTIONAL_PHONY: &[&str] = &[
    "all", "default", "build", "clean", "distclean", "install", "uninstall", "test", "check",
    "lint", "fmt", "format", "run", "dev", "deploy", "release", "dist", "docs", "help", "setup",
    "bootstrap", "ci", "coverage", "bench",
];

fn at_target<R: LintRule<Makefile>>(rule: &R, target: &Target, message: String) -> Diagnostic {
    rule.diagnostic(message)
        .with_field(&target.name)
        .with_value(target.dependencies.join(" "))
        .at_line(target.line)
}

/// Suggests the targets people expect to find.
pub struct ConventionalTargetRule;

impl LintRule<Makefile> for ConventionalTargetRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.conventional_target")
    }

    fn description(&self) -> &str {
        "Suggests all, clean and help targets"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        if makefile.targets.is_empty() {
            return Vec::new();
        }

        let expected: [(&[&str], &str); 3] = [
            (&["all", "default"], "all"),
            (&["clean"], "clean"),
            (&["help"], "help"),
        ];

        expected
            .iter()
            .filter(|(names, _)| !names.iter().any(|n| makefile.has_target(n)))
            .map(|(_, name)| {
                self.diagnostic(format!("No '{}' target", name))
                    .with_field(*name)
                    .with_suggestion(format!("Add a '{}' target", name))
            })
            .collect()
    }
}

pub struct EmptyTargetRule;

impl LintRule<Makefile> for EmptyTargetRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.empty_target")
    }

    fn description(&self) -> &str {
        "Flags targets with neither prerequisites nor a recipe"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        makefile
            .targets
            .iter()
            .filter(|t| !t.is_special() && t.dependencies.is_empty() && t.recipe_lines.is_empty())
            .map(|t| {
                at_target(self, t, format!("Target '{}' does nothing", t.name))
                    .with_suggestion("Add a recipe or prerequisites, or remove the target")
            })
            .collect()
    }
}

pub struct TargetNamingRule;

impl LintRule<Makefile> for TargetNamingRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.target_naming")
    }

    fn description(&self) -> &str {
        "Requires lower-case target names"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        makefile
            .targets
            .iter()
            .filter(|t| !t.is_special() && !t.is_pattern() && !t.name.contains('$'))
            .filter(|t| t.name.chars().any(char::is_uppercase))
            .map(|t| {
                at_target(self, t, format!("Target '{}' is not lower-case", t.name))
                    .with_suggestion(format!("Rename it to '{}'", t.name.to_lowercase()))
            })
            .collect()
    }
}

pub struct PhonyDeclarationRule;

impl LintRule<Makefile> for PhonyDeclarationRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.phony_declaration")
    }

    fn description(&self) -> &str {
        "Requires .PHONY for conventional action targets"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        let mut reported = Vec::new();
        let mut diagnostics = Vec::new();

        for target in &makefile.targets {
            if target.is_phony_declared
                || !CONVENTIONAL_PHONY.contains(&target.name.as_str())
                || reported.contains(&target.name)
            {
                continue;
            }
            reported.push(target.name.clone());
            diagnostics.push(
                at_target(
                    self,
                    target,
                    format!("Target '{}' is not declared .PHONY", target.name),
                )
                .with_suggestion(format!(".PHONY: {}", target.name)),
            );
        }

        diagnostics
    }
}

/// A second definition with its own recipe overrides the first.
pub struct DuplicateTargetRule;

impl LintRule<Makefile> for DuplicateTargetRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.duplicate_target")
    }

    fn description(&self) -> &str {
        "Flags targets defined twice with recipes"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut diagnostics = Vec::new();

        for target in &makefile.targets {
            if target.recipe_lines.is_empty() || target.double_colon {
                continue;
            }
            match seen.get(target.name.as_str()) {
                Some(first) => diagnostics.push(
                    at_target(
                        self,
                        target,
                        format!(
                            "Target '{}' already has a recipe on line {}",
                            target.name, first
                        ),
                    )
                    .with_suggestion("Merge the recipes; make only keeps the last one"),
                ),
                None => {
                    seen.insert(&target.name, target.line);
                }
            }
        }

        diagnostics
    }
}
