//! Base image rules.

use std::collections::HashSet;

use crate::dockerfile::parser::Dockerfile;
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};

use super::flag;

/// The image reference and stage alias of a `FROM` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImage<'a> {
    pub image: &'a str,
    pub alias: Option<&'a str>,
}

/// Split `FROM [--platform=...] image [AS name]`.
pub fn parse_from(args: &str) -> Option<BaseImage<'_>> {
    let mut tokens = args.split_whitespace().skip_while(|t| t.starts_with("--"));
    let image = tokens.next()?;
    let alias = match tokens.next() {
        Some(kw) if kw.eq_ignore_ascii_case("as") => tokens.next(),
        _ => None,
    };
    Some(BaseImage { image, alias })
}

/// Tag of an image reference, ignoring any registry port.
fn image_tag(image: &str) -> Option<&str> {
    let name = image.rsplit('/').next().unwrap_or(image);
    name.split_once(':').map(|(_, tag)| tag)
}

/// A Dockerfile must declare a base image.
pub struct FromRequiredRule;

impl LintRule<Dockerfile> for FromRequiredRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.from_required")
    }

    fn description(&self) -> &str {
        "Requires a FROM instruction"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn reports_missing_required(&self) -> bool {
        true
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        if dockerfile.has("FROM") {
            return Vec::new();
        }
        vec![self
            .diagnostic("Dockerfile must contain a FROM instruction")
            .with_field("FROM")
            .with_suggestion("Start the file with a base image, e.g. FROM debian:bookworm-slim")]
    }
}

/// Only `ARG` may precede the first `FROM`.
pub struct FromFirstRule;

impl LintRule<Dockerfile> for FromFirstRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.from_first")
    }

    fn description(&self) -> &str {
        "Requires FROM to be the first instruction (ARG excepted)"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let Some(first_from) = dockerfile.instructions.iter().position(|i| i.is("FROM")) else {
            return Vec::new();
        };

        dockerfile.instructions[..first_from]
            .iter()
            .filter(|i| !i.is("ARG"))
            .map(|i| {
                flag(
                    self,
                    i,
                    format!("{} appears before the first FROM instruction", i.command),
                )
                .with_suggestion("Move it after FROM; only ARG may come first")
            })
            .collect()
    }
}

/// Base images should be pinned to an explicit tag.
pub struct FromLatestTagRule;

impl LintRule<Dockerfile> for FromLatestTagRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.from_latest_tag")
    }

    fn description(&self) -> &str {
        "Flags base images without a tag or tagged 'latest'"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut stages: HashSet<String> = HashSet::new();

        for instruction in dockerfile.find("FROM") {
            let Some(base) = parse_from(&instruction.args) else {
                continue;
            };

            let exempt = base.image.eq_ignore_ascii_case("scratch")
                || base.image.contains('$')
                || base.image.contains('@')
                || stages.contains(&base.image.to_lowercase());

            if !exempt {
                let message = match image_tag(base.image) {
                    None => Some(format!(
                        "Base image '{}' has no tag and defaults to latest",
                        base.image
                    )),
                    Some("latest") => Some(format!(
                        "Base image '{}' uses the 'latest' tag",
                        base.image
                    )),
                    Some(_) => None,
                };
                if let Some(message) = message {
                    diagnostics.push(
                        flag(self, instruction, message)
                            .with_suggestion("Pin a specific version tag or digest"),
                    );
                }
            }

            if let Some(alias) = base.alias {
                stages.insert(alias.to_lowercase());
            }
        }

        diagnostics
    }
}

/// Instruction verbs are conventionally upper-case.
pub struct InstructionCaseRule;

impl LintRule<Dockerfile> for InstructionCaseRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.instruction_case")
    }

    fn description(&self) -> &str {
        "Flags instruction verbs not written in upper case"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        dockerfile
            .instructions
            .iter()
            .filter(|i| i.keyword != i.command)
            .map(|i| {
                flag(
                    self,
                    i,
                    format!("Instruction '{}' should be written upper-case", i.keyword),
                )
                .with_suggestion(format!("Use {}", i.command))
            })
            .collect()
    }
}
