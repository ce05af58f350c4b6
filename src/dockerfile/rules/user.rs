//! `USER` rules.

use crate::dockerfile::parser::{Dockerfile, Instruction};
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};

use super::flag;

/// User part of `USER name[:group]`.
fn user_of(instruction: &Instruction) -> Option<&str> {
    let spec = instruction.tokens().next()?;
    spec.split(':').next().filter(|u| !u.is_empty())
}

pub struct UserRootRule;

impl LintRule<Dockerfile> for UserRootRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.user_root")
    }

    fn description(&self) -> &str {
        "Flags USER set to root"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        dockerfile
            .find("USER")
            .filter(|i| {
                user_of(i).is_some_and(|u| u == "root" || u.parse::<u32>() == Ok(0))
            })
            .map(|i| {
                flag(self, i, "Container runs as root")
                    .with_suggestion("Create an unprivileged user and switch to it with USER")
            })
            .collect()
    }
}

pub struct UserNumericRule;

impl LintRule<Dockerfile> for UserNumericRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.user_numeric")
    }

    fn description(&self) -> &str {
        "Notes USER given as a bare numeric id"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        dockerfile
            .find("USER")
            .filter(|i| matches!(user_of(i).map(str::parse::<u32>), Some(Ok(uid)) if uid != 0))
            .map(|i| {
                flag(self, i, "USER uses a numeric id without a named user")
                    .with_suggestion("Create the user with a name so file ownership stays readable")
            })
            .collect()
    }
}
