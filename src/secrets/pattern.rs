//! Secret keyword patterns.
//!
//! This module provides the keyword catalog used to decide whether a key
//! name (an env variable, an `ENV` instruction, a Makefile variable, a
//! JSON property) is the kind of name that usually holds a credential, and
//! the placeholder catalog used to discard obviously fake values.

use regex::Regex;

/// A pattern that identifies secret-bearing key names.
#[derive(Debug, Clone)]
pub struct SecretPattern {
    /// Name of this pattern (for debugging).
    pub name: String,
    /// Regex matched against the lower-cased key name.
    pub key_pattern: Regex,
}

/// Built-in keyword patterns, matched against lower-cased key names.
///
/// Each tuple contains (name, regex_pattern).
pub const KEYWORD_PATTERNS: &[(&str, &str)] = &[
    ("password", r"password|passwd|pwd"),
    ("secret", r"secret|private"),
    ("token", r"token|jwt"),
    ("api_key", r"(^|[_.-])(api|key|apikey)([_.-]|$)"),
    ("auth", r"(^|[_.-])o?auth"),
    ("certificate", r"cert|certificate"),
    ("private_key", r"private[_.-]?key"),
    ("db_password", r"(db|database)[_.-]?pass"),
    ("aws", r"aws[_.-]?(access|secret|session)"),
    ("github_token", r"(github|gh)[_.-]?(token|pat)"),
];

/// Values that look like credentials but are documentation placeholders.
pub const PLACEHOLDER_PATTERNS: &[&str] = &[
    r"(?i)your[_-].*[_-]?here",
    r"(?i)<[^>]+>",
    r"(?i)example",
    r"(?i)change[_-]?me|replace[_-]?me",
    r"(?i)^(x{3,}|\*{3,}|placeholder|dummy|fake|sample|redacted)$",
    r"^\$\{[^}]+\}$",
    r"^\$\([^)]+\)$",
    r"^\{\{[^}]+\}\}$",
];

/// Matches key names against the keyword catalog.
///
/// # Example
///
/// ```
/// use infralint::secrets::KeywordMatcher;
///
/// let matcher = KeywordMatcher::with_builtins();
///
/// assert!(matcher.is_secret_key("API_KEY"));
/// assert!(matcher.is_secret_key("GITHUB_TOKEN"));
/// assert!(matcher.is_secret_key("DB_PASSWORD"));
///
/// assert!(!matcher.is_secret_key("PATH"));
/// assert!(!matcher.is_secret_key("MONKEY_COUNT"));
/// ```
pub struct KeywordMatcher {
    patterns: Vec<SecretPattern>,
}

impl KeywordMatcher {
    /// Create a matcher with built-in patterns.
    pub fn with_builtins() -> Self {
        let patterns = KEYWORD_PATTERNS
            .iter()
            .map(|(name, pattern)| SecretPattern {
                name: name.to_string(),
                key_pattern: Regex::new(pattern).expect("builtin keyword pattern is valid"),
            })
            .collect();

        Self { patterns }
    }

    /// Create a matcher with custom patterns.
    pub fn new(patterns: Vec<SecretPattern>) -> Self {
        Self { patterns }
    }

    /// Check if a key name matches any keyword pattern.
    pub fn is_secret_key(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.patterns.iter().any(|p| p.key_pattern.is_match(&key))
    }

    /// Name of the first pattern matching `key`.
    pub fn matching_pattern(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.patterns
            .iter()
            .find(|p| p.key_pattern.is_match(&key))
            .map(|p| p.name.as_str())
    }

    /// Get the number of patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Compile the placeholder catalog.
pub(crate) fn placeholder_regexes() -> Vec<Regex> {
    PLACEHOLDER_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("builtin placeholder pattern is valid"))
        .collect()
}
