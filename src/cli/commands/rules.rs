//! Rules command implementation.
//!
//! `infralint rules` lists the built-in catalog of every validator, or of
//! one kind, in application order.

use std::io::Write;

use console::style;
use serde::Serialize;

use crate::cli::args::RulesArgs;
use crate::error::Result;
use crate::lint::RuleInfo;
use crate::validator::builtin_validators;

use super::dispatcher::{Command, CommandResult};

/// The rules command implementation.
pub struct RulesCommand {
    args: RulesArgs,
    color: bool,
}

#[derive(Serialize)]
struct KindRules {
    kind: String,
    rules: Vec<RuleInfo>,
}

impl RulesCommand {
    /// Create a new rules command.
    pub fn new(args: RulesArgs) -> Self {
        Self { args, color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn listings(&self) -> Vec<KindRules> {
        builtin_validators()
            .iter()
            .filter(|v| self.args.kind.map_or(true, |kind| v.kind() == kind))
            .map(|v| KindRules {
                kind: v.kind().to_string(),
                rules: v.rules(),
            })
            .collect()
    }

    fn write_human(&self, listings: &[KindRules], out: &mut dyn Write) -> std::io::Result<()> {
        for (index, listing) in listings.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            if self.color {
                writeln!(out, "{}", style(&listing.kind).bold())?;
            } else {
                writeln!(out, "{}", listing.kind)?;
            }
            for rule in &listing.rules {
                writeln!(
                    out,
                    "  {:<40} {:<8} {:<14} {}",
                    rule.id.to_string(),
                    rule.severity.to_string(),
                    rule.category.to_string(),
                    rule.description
                )?;
            }
        }
        Ok(())
    }
}

impl Command for RulesCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let listings = self.listings();

        if self.args.json {
            let json = serde_json::to_string_pretty(&listings).map_err(|e| anyhow::anyhow!(e))?;
            writeln!(out, "{}", json)?;
        } else {
            self.write_human(&listings, out)?;
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::FileKind;

    fn run(args: RulesArgs) -> String {
        let mut out = Vec::new();
        let result = RulesCommand::new(args).execute(&mut out).unwrap();
        assert!(result.success);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_every_kind() {
        let output = run(RulesArgs::default());

        for kind in FileKind::ALL {
            assert!(output.lines().any(|l| l == kind.as_str()), "missing {}", kind);
        }
        assert!(output.contains("dockerfile.from_required"));
        assert!(output.contains("env.missing_common"));
        assert!(output.contains("structured.syntax"));
    }

    #[test]
    fn filters_by_kind() {
        let output = run(RulesArgs {
            kind: Some(FileKind::Env),
            json: false,
        });

        assert!(output.starts_with("env\n"));
        assert!(!output.contains("dockerfile."));
        assert!(output.contains("env.duplicate_key"));
    }

    #[test]
    fn json_listing_keeps_catalog_order() {
        let output = run(RulesArgs {
            kind: Some(FileKind::Makefile),
            json: true,
        });

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let rules = json[0]["rules"].as_array().unwrap();
        assert_eq!(json[0]["kind"], "makefile");
        assert_eq!(rules.len(), 15);
        assert_eq!(rules[0]["id"], "makefile.conventional_target");
        assert_eq!(rules[14]["severity"], "error");
    }
}
