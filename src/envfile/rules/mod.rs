//! Built-in env file rules.

use std::sync::Arc;

use crate::lint::RuleCatalog;
use crate::secrets::SecretDetector;

use super::parser::EnvFile;

pub mod completeness;
pub mod keys;
pub mod security;
pub mod values;

pub use completeness::{CommonKey, MissingCommonRule, COMMON_KEYS};
pub use keys::{DuplicateKeyRule, FormatRule, KeyCaseRule, KeyFormatRule, ReservedKeyRule};
pub use security::{HardcodedIpRule, InsecureUrlRule, ProductionLocalhostRule, SecretRule};
pub use values::{BooleanValueRule, EmptyValueRule, NumericStringRule, UnquotedSpaceRule};

/// Build the env file catalog.
pub fn catalog(detector: Arc<SecretDetector>) -> RuleCatalog<EnvFile> {
    let mut catalog = RuleCatalog::new();

    catalog.register(Box::new(FormatRule));
    catalog.register(Box::new(DuplicateKeyRule));
    catalog.register(Box::new(KeyFormatRule::new()));
    catalog.register(Box::new(KeyCaseRule));
    catalog.register(Box::new(ReservedKeyRule));
    catalog.register(Box::new(UnquotedSpaceRule));
    catalog.register(Box::new(EmptyValueRule));
    catalog.register(Box::new(BooleanValueRule));
    catalog.register(Box::new(NumericStringRule));
    catalog.register(Box::new(SecretRule::new(detector)));
    catalog.register(Box::new(InsecureUrlRule::new()));
    catalog.register(Box::new(HardcodedIpRule::new()));
    catalog.register(Box::new(ProductionLocalhostRule));

    catalog.register(Box::new(MissingCommonRule));

    catalog
}
