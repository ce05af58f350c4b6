//! Built-in Dockerfile rules.
//!
//! [`catalog`] registers them in output order: structural checks, then
//! per-instruction checks, then whole-document checks.

use std::sync::Arc;

use crate::lint::{Diagnostic, LintRule, RuleCatalog};
use crate::secrets::SecretDetector;
use crate::shell::ShellHeuristics;

use super::parser::{Dockerfile, Instruction};

pub mod copy;
pub mod document;
pub mod env;
pub mod expose;
pub mod run;
pub mod structure;
pub mod user;

pub use copy::{AddInsteadOfCopyRule, CopyAbsoluteSourceRule, CopyWholeContextRule};
pub use document::{
    ExecFormRule, HealthcheckMissingRule, LayerCountRule, MaintainerDeprecatedRule,
    MultipleCmdRule, UserMissingRule, WorkdirRelativeRule,
};
pub use env::EnvSecretRule;
pub use expose::{ExposeInsecurePortRule, ExposeInvalidPortRule};
pub use run::{DangerousCommandRule, PackageCacheRule, UnverifiedDownloadRule};
pub use structure::{FromFirstRule, FromLatestTagRule, FromRequiredRule, InstructionCaseRule};
pub use user::{UserNumericRule, UserRootRule};

/// Build the Dockerfile catalog with every built-in rule.
pub fn catalog(shell: Arc<ShellHeuristics>, detector: Arc<SecretDetector>) -> RuleCatalog<Dockerfile> {
    let mut catalog = RuleCatalog::new();

    catalog.register(Box::new(FromRequiredRule));
    catalog.register(Box::new(FromFirstRule));
    catalog.register(Box::new(FromLatestTagRule));
    catalog.register(Box::new(InstructionCaseRule));

    catalog.register(Box::new(DangerousCommandRule::new(shell.clone())));
    catalog.register(Box::new(UnverifiedDownloadRule::new(shell.clone())));
    catalog.register(Box::new(PackageCacheRule::new(shell)));
    catalog.register(Box::new(UserRootRule));
    catalog.register(Box::new(UserNumericRule));
    catalog.register(Box::new(CopyAbsoluteSourceRule));
    catalog.register(Box::new(CopyWholeContextRule));
    catalog.register(Box::new(AddInsteadOfCopyRule));
    catalog.register(Box::new(ExposeInsecurePortRule::new()));
    catalog.register(Box::new(ExposeInvalidPortRule));
    catalog.register(Box::new(EnvSecretRule::new(detector)));
    catalog.register(Box::new(WorkdirRelativeRule));
    catalog.register(Box::new(ExecFormRule));
    catalog.register(Box::new(MaintainerDeprecatedRule));

    catalog.register(Box::new(UserMissingRule));
    catalog.register(Box::new(HealthcheckMissingRule));
    catalog.register(Box::new(MultipleCmdRule));
    catalog.register(Box::new(LayerCountRule));

    catalog
}

/// Diagnostic from `rule` anchored at `instruction`.
pub(crate) fn flag<R>(rule: &R, instruction: &Instruction, message: impl Into<String>) -> Diagnostic
where
    R: LintRule<Dockerfile>,
{
    rule.diagnostic(message)
        .with_field(&instruction.command)
        .with_value(&instruction.args)
        .at_line(instruction.line)
}
