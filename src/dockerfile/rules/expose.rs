//! `EXPOSE` rules.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::dockerfile::parser::Dockerfile;
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};

use super::flag;

/// Ports for plaintext or remote-administration protocols.
pub const INSECURE_PORTS: &[(u16, &str)] = &[
    (21, "FTP"),
    (22, "SSH"),
    (23, "Telnet"),
    (69, "TFTP"),
    (110, "POP3"),
    (143, "IMAP"),
    (445, "SMB"),
    (2375, "unencrypted Docker daemon"),
    (3389, "RDP"),
    (5900, "VNC"),
];

/// Parse one `EXPOSE` token (`80`, `8000-8010`, `53/udp`).
///
/// Returns `None` for tokens that cannot be checked (variables) and
/// `Some(Err(()))` for tokens that are not a valid port spec.
fn parse_port_spec(token: &str) -> Option<Result<RangeInclusive<u16>, ()>> {
    if token.contains('$') {
        return None;
    }

    let (ports, protocol) = match token.split_once('/') {
        Some((ports, protocol)) => (ports, Some(protocol)),
        None => (token, None),
    };
    if protocol.is_some_and(|p| !p.eq_ignore_ascii_case("tcp") && !p.eq_ignore_ascii_case("udp")) {
        return Some(Err(()));
    }

    let port = |s: &str| s.parse::<u16>().ok().filter(|p| *p >= 1);
    let range = match ports.split_once('-') {
        Some((start, end)) => match (port(start), port(end)) {
            (Some(start), Some(end)) if start <= end => Ok(start..=end),
            _ => Err(()),
        },
        None => port(ports).map(|p| p..=p).ok_or(()),
    };
    Some(range)
}

pub struct ExposeInsecurePortRule {
    ports: BTreeMap<u16, &'static str>,
}

impl ExposeInsecurePortRule {
    pub fn new() -> Self {
        Self {
            ports: INSECURE_PORTS.iter().copied().collect(),
        }
    }
}

impl Default for ExposeInsecurePortRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule<Dockerfile> for ExposeInsecurePortRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.expose_insecure_port")
    }

    fn description(&self) -> &str {
        "Flags exposed ports of insecure or administrative protocols"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for expose in dockerfile.find("EXPOSE") {
            for token in expose.tokens() {
                let Some(Ok(range)) = parse_port_spec(token) else {
                    continue;
                };
                for (port, protocol) in self.ports.range(range) {
                    diagnostics.push(
                        flag(self, expose, format!("Port {} exposes {}", port, protocol))
                            .with_value(token)
                            .with_suggestion("Expose only the ports the service needs"),
                    );
                }
            }
        }
        diagnostics
    }
}

pub struct ExposeInvalidPortRule;

impl LintRule<Dockerfile> for ExposeInvalidPortRule {
    fn id(&self) -> RuleId {
        RuleId::new("dockerfile.expose_invalid_port")
    }

    fn description(&self) -> &str {
        "Requires EXPOSE ports in 1-65535"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::Format
    }

    fn check(&self, dockerfile: &Dockerfile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for expose in dockerfile.find("EXPOSE") {
            for token in expose.tokens() {
                if let Some(Err(())) = parse_port_spec(token) {
                    diagnostics.push(
                        flag(self, expose, format!("'{}' is not a valid port", token))
                            .with_value(token)
                            .with_suggestion("Use a port between 1 and 65535, optionally with /tcp or /udp"),
                    );
                }
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_port_specs() {
        assert_eq!(parse_port_spec("80"), Some(Ok(80..=80)));
        assert_eq!(parse_port_spec("53/udp"), Some(Ok(53..=53)));
        assert_eq!(parse_port_spec("8000-8010/tcp"), Some(Ok(8000..=8010)));
        assert_eq!(parse_port_spec("$PORT"), None);
        assert_eq!(parse_port_spec("0"), Some(Err(())));
        assert_eq!(parse_port_spec("70000"), Some(Err(())));
        assert_eq!(parse_port_spec("90-80"), Some(Err(())));
        assert_eq!(parse_port_spec("80/sctp"), Some(Err(())));
    }

    #[test]
    fn one_warning_per_insecure_port() {
        let rule = ExposeInsecurePortRule::new();
        let diagnostics = rule.check(&Dockerfile::parse("EXPOSE 22 80 23/tcp"));

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.contains("SSH"));
        assert_eq!(diagnostics[1].value, "23/tcp");
    }

    #[test]
    fn ranges_cover_insecure_ports() {
        let rule = ExposeInsecurePortRule::new();
        let diagnostics = rule.check(&Dockerfile::parse("EXPOSE 20-25"));

        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn invalid_port_is_error() {
        let diagnostics = ExposeInvalidPortRule.check(&Dockerfile::parse("EXPOSE 8080 http"));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].value, "http");
    }
}
