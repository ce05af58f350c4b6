//! `COPY` and `ADD` source rules.

use crate::dockerfile::parser::{Dockerfile, Instruction};
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};

use super::flag;

const ARCHIVE_SUFFIXES: &[&str] = &[
    ".tar", ".tar.gz", ".tgz", ".tar.bz2", ".tbz", ".tbz2", ".tar.xz", ".txz", ".tar.zst",
];

/// Source operands of a `COPY`/`ADD`, or `None` when copying from another
/// stage or image.
pub fn copy_sources(instruction: &Instruction) -> Option<Vec<String>> {
    if instruction.has_flag("--from") {
        return None;
    }

    let mut rest = instruction.args.trim_start();
    while rest.starts_with("--") {
        rest = rest
            .split_once(char::is_whitespace)
            .map(|(_, r)| r.trim_start())
            .unwrap_or("");
    }

    let operands: Vec<String> = if rest.starts_with('[') {
        serde_json::from_str(rest).ok()?
    } else {
        rest.split_whitespace().map(String::from).collect()
    };

    match operands.split_last() {
        Some((_, sources)) => Some(sources.to_vec()),
        None => Some(Vec::new()),
    }
}

fn copy_like(dockerfile: &Dockerfile) -> impl Iterator<Item = &Instruction> {
    dockerfile
        .instructions
        .iter()
        .filter(|i| i.is("COPY") || i.is("ADD"))
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://") || source.starts_with("git@")
}

pub struct CopyAbsoluteSourceRule;

impl LintRule<Dockerfile> for CopyAbsoluteSourceRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.copy_absolute_source")
    }

    fn description(&self) -> &str {
        "Notes COPY/ADD sources given as absolute paths"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for instruction in copy_like(dockerfile) {
            for source in copy_sources(instruction).unwrap_or_default() {
                if source.starts_with('/') {
                    diagnostics.push(
                        flag(
                            self,
                            instruction,
                            format!("{} source '{}' is an absolute path", instruction.command, source),
                        )
                        .with_suggestion("Use a path relative to the build context"),
                    );
                }
            }
        }
        diagnostics
    }
}

pub struct CopyWholeContextRule;

impl LintRule<Dockerfile> for CopyWholeContextRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.copy_whole_context")
    }

    fn description(&self) -> &str {
        "Flags copying the entire build context"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        copy_like(dockerfile)
            .filter(|i| {
                copy_sources(i)
                    .unwrap_or_default()
                    .iter()
                    .any(|s| s == "." || s == "./")
            })
            .map(|i| {
                flag(self, i, format!("{} copies the whole build context", i.command))
                    .with_suggestion("Copy only what the image needs, and keep a .dockerignore")
            })
            .collect()
    }
}

pub struct AddInsteadOfCopyRule;

impl LintRule<Dockerfile> for AddInsteadOfCopyRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.add_instead_of_copy")
    }

    fn description(&self) -> &str {
        "Notes ADD used for plain local files"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        dockerfile
            .find("ADD")
            .filter(|i| {
                copy_sources(i).unwrap_or_default().iter().any(|s| {
                    let lower = s.to_lowercase();
                    !is_remote(s) && !ARCHIVE_SUFFIXES.iter().any(|ext| lower.ends_with(ext))
                })
            })
            .map(|i| {
                flag(self, i, "ADD is used for local files that need no extraction")
                    .with_suggestion("Use COPY for plain files")
            })
            .collect()
    }
}
