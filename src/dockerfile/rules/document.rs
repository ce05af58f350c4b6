//! Instruction-form and whole-document rules.

use crate::dockerfile::parser::Dockerfile;
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};
use crate::secrets::strip_quotes;

use super::flag;

/// `RUN` count above which layer merging is suggested.
pub const MAX_RUN_INSTRUCTIONS: usize = 10;

/// `COPY`/`ADD` count above which layer merging is suggested.
pub const MAX_COPY_INSTRUCTIONS: usize = 5;

pub struct WorkdirRelativeRule;

impl LintRule<Dockerfile> for WorkdirRelativeRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.workdir_relative")
    }

    fn description(&self) -> &str {
        "Requires WORKDIR to be an absolute path"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        dockerfile
            .find("WORKDIR")
            .filter(|i| {
                let path = strip_quotes(i.args.trim());
                let bytes = path.as_bytes();
                let windows_drive =
                    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
                !path.is_empty() && !path.starts_with('/') && !path.starts_with('$') && !windows_drive
            })
            .map(|i| {
                flag(self, i, format!("WORKDIR '{}' is relative", i.args.trim()))
                    .with_suggestion("Use an absolute path such as /app")
            })
            .collect()
    }
}

/// `CMD` and `ENTRYPOINT` should use the JSON exec form.
pub struct ExecFormRule;

impl LintRule<Dockerfile> for ExecFormRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.exec_form")
    }

    fn description(&self) -> &str {
        "Suggests the exec form for CMD and ENTRYPOINT"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        dockerfile
            .instructions
            .iter()
            .filter(|i| i.is("CMD") || i.is("ENTRYPOINT"))
            .filter(|i| !i.args.trim().is_empty() && !i.args.trim_start().starts_with('['))
            .map(|i| {
                flag(self, i, format!("{} uses the shell form", i.command))
                    .with_suggestion(format!(
                        "Use the exec form, e.g. {} [\"executable\", \"arg\"], so signals reach the process",
                        i.command
                    ))
            })
            .collect()
    }
}

pub struct MaintainerDeprecatedRule;

impl LintRule<Dockerfile> for MaintainerDeprecatedRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.maintainer_deprecated")
    }

    fn description(&self) -> &str {
        "Flags the deprecated MAINTAINER instruction"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        dockerfile
            .find("MAINTAINER")
            .map(|i| {
                flag(self, i, "MAINTAINER is deprecated")
                    .with_suggestion("Use LABEL org.opencontainers.image.authors=\"...\"")
            })
            .collect()
    }
}

pub struct UserMissingRule;

impl LintRule<Dockerfile> for UserMissingRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.user_missing")
    }

    fn description(&self) -> &str {
        "Flags images that never switch away from root"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        if !dockerfile.has("FROM") || dockerfile.has("USER") {
            return Vec::new();
        }
        vec![self
            .diagnostic("No USER instruction; the container will run as root")
            .with_field("USER")
            .with_suggestion("Add USER with an unprivileged account before CMD")]
    }
}

pub struct HealthcheckMissingRule;

impl LintRule<Dockerfile> for HealthcheckMissingRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.healthcheck_missing")
    }

    fn description(&self) -> &str {
        "Flags images without a HEALTHCHECK"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        // HEALTHCHECK NONE is an explicit choice and counts
        if !dockerfile.has("FROM") || dockerfile.has("HEALTHCHECK") {
            return Vec::new();
        }
        vec![self
            .diagnostic("No HEALTHCHECK instruction")
            .with_field("HEALTHCHECK")
            .with_suggestion("Add HEALTHCHECK CMD <probe> so orchestrators can detect failures")]
    }
}

/// Only the last `CMD` of the final stage takes effect.
pub struct MultipleCmdRule;

impl LintRule<Dockerfile> for MultipleCmdRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.multiple_cmd")
    }

    fn description(&self) -> &str {
        "Flags more than one CMD in the final stage"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let cmds: Vec<_> = dockerfile
            .final_stage()
            .iter()
            .filter(|i| i.is("CMD"))
            .collect();
        let Some((last, earlier)) = cmds.split_last() else {
            return Vec::new();
        };

        earlier
            .iter()
            .map(|i| {
                flag(
                    self,
                    i,
                    format!("CMD is overridden by the CMD on line {}", last.line),
                )
                .with_suggestion("Keep a single CMD per stage")
            })
            .collect()
    }
}

pub struct LayerCountRule;

impl LintRule<Dockerfile> for LayerCountRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.layer_count")
    }

    fn description(&self) -> &str {
        "Suggests merging layers when there are many RUN or COPY/ADD instructions"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::Performance
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let runs = dockerfile.find("RUN").count();
        let copies = dockerfile.find("COPY").count() + dockerfile.find("ADD").count();

        if runs <= MAX_RUN_INSTRUCTIONS && copies <= MAX_COPY_INSTRUCTIONS {
            return Vec::new();
        }
        vec![self
            .diagnostic(format!(
                "Image has {} RUN and {} COPY/ADD instructions",
                runs, copies
            ))
            .with_field("layers")
            .with_value(format!("RUN={} COPY/ADD={}", runs, copies))
            .with_suggestion("Combine related commands with && to reduce layers")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_workdir() {
        let dockerfile = Dockerfile::parse("WORKDIR app\nWORKDIR /srv\nWORKDIR $HOME/x\nWORKDIR C:\\app");
        let diagnostics = WorkdirRelativeRule.check(&dockerfile);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, Some(1));
    }

    #[test]
    fn shell_form_cmd_and_entrypoint() {
        let dockerfile = Dockerfile::parse("CMD npm start\nENTRYPOINT [\"tini\", \"--\"]\nENTRYPOINT ./run.sh");
        let diagnostics = ExecFormRule.check(&dockerfile);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1].field, "ENTRYPOINT");
    }

    #[test]
    fn maintainer_is_flagged() {
        let diagnostics = MaintainerDeprecatedRule.check(&Dockerfile::parse("MAINTAINER a@b.c"));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn user_and_healthcheck_missing() {
        let dockerfile = Dockerfile::parse("FROM alpine:3");

        assert_eq!(UserMissingRule.check(&dockerfile).len(), 1);
        assert_eq!(HealthcheckMissingRule.check(&dockerfile).len(), 1);
    }

    #[test]
    fn healthcheck_none_counts_as_present() {
        let dockerfile = Dockerfile::parse("FROM alpine:3\nHEALTHCHECK NONE");
        assert!(HealthcheckMissingRule.check(&dockerfile).is_empty());
    }

    #[test]
    fn document_rules_skip_empty_files() {
        let dockerfile = Dockerfile::parse("");

        assert!(UserMissingRule.check(&dockerfile).is_empty());
        assert!(HealthcheckMissingRule.check(&dockerfile).is_empty());
    }

    #[test]
    fn multiple_cmd_only_in_final_stage() {
        let single = Dockerfile::parse("FROM a:1 AS build\nCMD [\"x\"]\nFROM b:1\nCMD [\"y\"]");
        assert!(MultipleCmdRule.check(&single).is_empty());

        let double = Dockerfile::parse("FROM b:1\nCMD [\"x\"]\nCMD [\"y\"]");
        let diagnostics = MultipleCmdRule.check(&double);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, Some(2));
        assert!(diagnostics[0].message.contains("line 3"));
    }

    #[test]
    fn layer_count_fires_once() {
        let mut content = String::from("FROM alpine:3\n");
        for i in 0..11 {
            content.push_str(&format!("RUN echo {}\n", i));
        }
        for i in 0..6 {
            content.push_str(&format!("COPY f{} /f{}\n", i, i));
        }
        let diagnostics = LayerCountRule.check(&Dockerfile::parse(&content));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category, Category::Performance);
    }

    #[test]
    fn layer_count_at_threshold_is_silent() {
        let mut content = String::from("FROM alpine:3\n");
        for i in 0..10 {
            content.push_str(&format!("RUN echo {}\n", i));
        }
        assert!(LayerCountRule.check(&Dockerfile::parse(&content)).is_empty());
    }
}
