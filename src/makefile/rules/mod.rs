//! Built-in Makefile rules.

use std::sync::Arc;

use crate::lint::RuleCatalog;
use crate::secrets::SecretDetector;
use crate::shell::ShellHeuristics;

use super::parser::Makefile;

pub mod layout;
pub mod recipes;
pub mod targets;
pub mod variables;

pub use layout::{LineLengthRule, TabIndentationRule, TrailingWhitespaceRule};
pub use recipes::{DangerousCommandRule, ShellSpecificSyntaxRule, UnverifiedDownloadRule};
pub use targets::{
    ConventionalTargetRule, DuplicateTargetRule, EmptyTargetRule, PhonyDeclarationRule,
    TargetNamingRule,
};
pub use variables::{
    HardcodedPathRule, RecursiveSelfReferenceRule, VariableNamingRule, VariableSecretRule,
};

/// Build the Makefile catalog: targets, recipes, variables, then layout.
pub fn catalog(shell: Arc<ShellHeuristics>, detector: Arc<SecretDetector>) -> RuleCatalog<Makefile> {
    let mut catalog = RuleCatalog::new();

    catalog.register(Box::new(ConventionalTargetRule));
    catalog.register(Box::new(EmptyTargetRule));
    catalog.register(Box::new(TargetNamingRule));
    catalog.register(Box::new(PhonyDeclarationRule));
    catalog.register(Box::new(DuplicateTargetRule));

    catalog.register(Box::new(DangerousCommandRule::new(shell.clone())));
    catalog.register(Box::new(UnverifiedDownloadRule::new(shell)));
    catalog.register(Box::new(ShellSpecificSyntaxRule::new()));

    catalog.register(Box::new(VariableNamingRule));
    catalog.register(Box::new(HardcodedPathRule));
    catalog.register(Box::new(RecursiveSelfReferenceRule));
    catalog.register(Box::new(VariableSecretRule::new(detector)));

    catalog.register(Box::new(LineLengthRule));
    catalog.register(Box::new(TrailingWhitespaceRule));
    catalog.register(Box::new(TabIndentationRule));

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_and_size() {
        let ids: Vec<String> = catalog(Arc::default(), Arc::default())
            .iter()
            .map(|r| r.id().to_string())
            .collect();

        assert_eq!(ids.len(), 15);
        assert_eq!(ids[0], "makefile.conventional_target");
        assert_eq!(ids[14], "makefile.tab_indentation");
        assert!(ids.iter().all(|id| id.starts_with("makefile.")));
    }
}
