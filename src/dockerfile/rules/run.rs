//! Rules over `RUN` commands (and `ADD` downloads).

use std::sync::Arc;

use crate::dockerfile::parser::Dockerfile;
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};
use crate::shell::ShellHeuristics;

use super::flag;

/// Flags `RUN` commands on the dangerous-command deny-list.
pub struct DangerousCommandRule {
    shell: Arc<ShellHeuristics>,
}

impl DangerousCommandRule {
    pub fn new(shell: Arc<ShellHeuristics>) -> Self {
        Self { shell }
    }
}

impl LintRule<Dockerfile> for DangerousCommandRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.dangerous_command")
    }

    fn description(&self) -> &str {
        "Flags RUN commands matching the dangerous-command deny-list"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for run in dockerfile.find("RUN") {
            for pattern in self.shell.dangerous_matches(&run.args) {
                diagnostics.push(
                    flag(self, run, format!("RUN uses a dangerous command: {}", pattern.description))
                        .with_suggestion("Remove the command or scope it to a specific path"),
                );
            }
        }
        diagnostics
    }
}

/// Flags downloads that are never verified.
pub struct UnverifiedDownloadRule {
    shell: Arc<ShellHeuristics>,
}

impl UnverifiedDownloadRule {
    pub fn new(shell: Arc<ShellHeuristics>) -> Self {
        Self { shell }
    }
}

impl LintRule<Dockerfile> for UnverifiedDownloadRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.unverified_download")
    }

    fn description(&self) -> &str {
        "Flags curl/wget downloads and remote ADD sources without verification"
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
            if instruction.is("RUN") && self.shell.is_unverified_download(&instruction.args) {
                diagnostics.push(
                    flag(self, instruction, "RUN downloads a file without verifying it")
                        .with_suggestion("Check the download with sha256sum -c or gpg --verify"),
                );
            } else if instruction.is("ADD")
                && !instruction.has_flag("--checksum")
                && instruction
                    .tokens()
                    .any(|t| t.starts_with("http://") || t.starts_with("https://"))
            {
                diagnostics.push(
                    flag(self, instruction, "ADD fetches a remote URL without a checksum")
                        .with_suggestion("Add --checksum=sha256:<digest> to the ADD instruction"),
                );
            }
        }

        diagnostics
    }
}

/// Flags package installs that leave the package cache in the layer.
pub struct PackageCacheRule {
    shell: Arc<ShellHeuristics>,
}

impl PackageCacheRule {
    pub fn new(shell: Arc<ShellHeuristics>) -> Self {
        Self { shell }
    }
}

impl LintRule<Dockerfile> for PackageCacheRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.package_cache")
    }

    fn description(&self) -> &str {
        "Flags package installs without cache cleanup in the same RUN"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for run in dockerfile.find("RUN") {
            for manager in self.shell.missing_cleanup(&run.args) {
                diagnostics.push(
                    flag(
                        self,
                        run,
                        format!("{} install leaves its package cache in the image", manager.name),
                    )
                    .with_suggestion(manager.suggestion),
                );
            }
        }
        diagnostics
    }
}
