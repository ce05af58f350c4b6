//! Credential and network hygiene rules.

use std::net::Ipv4Addr;
use std::sync::Arc;

use regex::Regex;

use crate::envfile::parser::EnvFile;
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};
use crate::secrets::SecretDetector;

use super::keys::at_assignment;

/// Hosts that may be reached over plain http.
pub const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "[::1]"];

pub struct SecretRule {
    detector: Arc<SecretDetector>,
}

impl SecretRule {
    pub fn new(detector: Arc<SecretDetector>) -> Self {
        Self { detector }
    }
}

impl LintRule<EnvFile> for SecretRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.secret")
    }

    fn description(&self) -> &str {
        "Flags values that look like hardcoded secrets"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| self.detector.looks_like_secret(a.key, a.value()))
            .map(|a| {
                at_assignment(self, &a, format!("Variable '{}' looks like a hardcoded secret", a.key))
                    .with_suggestion("Keep real credentials out of committed env files; commit a .env.example with placeholders")
            })
            .collect()
    }
}

pub struct InsecureUrlRule {
    url: Regex,
}

impl InsecureUrlRule {
    pub fn new() -> Self {
        Self {
            url: Regex::new(r#"http://([^/\s:"'?#]+|\[[^\]]+\])"#).expect("url pattern is valid"),
        }
    }
}

impl Default for InsecureUrlRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule<EnvFile> for InsecureUrlRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.insecure_url")
    }

    fn description(&self) -> &str {
        "Flags plain http URLs to non-local hosts"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for assignment in env.assignments() {
            let remote = self
                .url
                .captures_iter(assignment.raw_value)
                .filter_map(|c| c.get(1))
                .find(|host| !LOCAL_HOSTS.contains(&host.as_str().to_lowercase().as_str()));
            if let Some(host) = remote {
                diagnostics.push(
                    at_assignment(
                        self,
                        &assignment,
                        format!("Variable '{}' uses plain http to {}", assignment.key, host.as_str()),
                    )
                    .with_suggestion("Use https://"),
                );
            }
        }
        diagnostics
    }
}

/// Dotted quads count only when every octet is in range, the match is not
/// part of a longer dotted run, and the key is not a version key.
pub struct HardcodedIpRule {
    ipv4: Regex,
}

impl HardcodedIpRule {
    pub fn new() -> Self {
        Self {
            ipv4: Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").expect("ipv4 pattern is valid"),
        }
    }
}

impl Default for HardcodedIpRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule<EnvFile> for HardcodedIpRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.hardcoded_ip")
    }

    fn description(&self) -> &str {
        "Notes IP address literals other than loopback and 0.0.0.0"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for assignment in env.assignments() {
            if assignment.key.to_lowercase().contains("version") {
                continue;
            }
            let raw = assignment.raw_value;
            let address = self
                .ipv4
                .find_iter(raw)
                .filter(|m| !raw[..m.start()].ends_with('.') && !raw[m.end()..].starts_with('.'))
                .filter_map(|m| m.as_str().parse::<Ipv4Addr>().ok())
                .find(|ip| !ip.is_loopback() && !ip.is_unspecified());
            if let Some(ip) = address {
                diagnostics.push(
                    at_assignment(
                        self,
                        &assignment,
                        format!("Variable '{}' hardcodes the address {}", assignment.key, ip),
                    )
                    .with_suggestion("Use a host name"),
                );
            }
        }
        diagnostics
    }
}

pub struct ProductionLocalhostRule;

impl LintRule<EnvFile> for ProductionLocalhostRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.production_localhost")
    }

    fn description(&self) -> &str {
        "Flags production settings that point at localhost"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        env.assignments()
            .filter(|a| a.key.to_lowercase().contains("prod"))
            .filter(|a| {
                let value = a.raw_value.to_lowercase();
                value.contains("localhost") || value.contains("127.0.0.1") || value.contains("[::1]")
            })
            .map(|a| {
                at_assignment(self, &a, format!("Production variable '{}' points at localhost", a.key))
                    .with_suggestion("Point it at the production host")
            })
            .collect()
    }
}
