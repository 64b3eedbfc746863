use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::errors::ConfigError;
use crate::cidr_filter::CidrFilter;
use crate::errors::RelayError;
use crate::domain_set::DomainSuffixSet;
use crate::policy::Policy;
use crate::rule::Rule;
use crate::rule_table::{normalize_fqdn, RuleTable};

/// Parsed static configuration: one directive per line, whitespace
/// tokenized. Strict, unlike the watched-file format: an unknown directive
/// or a malformed argument here aborts startup.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    pub zones: Vec<Arc<str>>,
    pub rules: Vec<Rule>,
    pub domains: DomainSuffixSet,
    pub relay_targets: Vec<SocketAddr>,
    pub reload_interval: Option<Duration>,
    pub watch_files: Vec<String>,
}

impl RelayConfig {
    /// Parse a directive text block.
    ///
    /// Blank lines and `#` comments are tolerated; everything else must be
    /// a recognized directive. Successive `net` lines accumulate into one
    /// rule covering the configured zones, matching how a single server
    /// block accumulates its policies.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut config = RelayConfig::default();
        let mut rule = Rule::default();

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(directive) = fields.next() else {
                continue;
            };
            let directive = directive.to_ascii_lowercase();
            let args: Vec<&str> = fields.collect();
            if args.is_empty() {
                return Err(ConfigError::EmptyDirective(directive));
            }

            match directive.as_str() {
                "zone" => {
                    for zone in &args {
                        config.zones.push(Arc::from(normalize_fqdn(zone)));
                    }
                }
                "net" => {
                    let filter = CidrFilter::build(&args).map_err(|e| match e {
                        RelayError::InvalidCidr(token) => ConfigError::InvalidCidr(token),
                        other => ConfigError::InvalidCidr(other.to_string()),
                    })?;
                    rule.policies.push(Policy::Network(filter));
                }
                "domain" => {
                    config.domains.insert(args[0], "");
                }
                "reload" => {
                    config.reload_interval = Some(parse_duration(args[0])?);
                }
                "relay" => {
                    for target in &args {
                        let addr: SocketAddr = target.parse().map_err(
                            |e: std::net::AddrParseError| {
                                ConfigError::InvalidRelayTarget(
                                    (*target).to_string(),
                                    e.to_string(),
                                )
                            },
                        )?;
                        config.relay_targets.push(addr);
                    }
                }
                "match" => {
                    config.watch_files.push(args[0].to_string());
                }
                _ => return Err(ConfigError::UnknownDirective(directive)),
            }
        }

        if !rule.policies.is_empty() {
            config.rules.push(rule);
        }
        Ok(config)
    }

    /// Build the initial rule table from the static directives.
    pub fn build_table(&self) -> RuleTable {
        RuleTable::new(
            self.rules.clone(),
            self.domains.clone(),
            self.zones.clone(),
            self.relay_targets.clone(),
        )
    }

    /// Resolve relative `match` paths against the config file's directory.
    pub fn resolve_watch_paths(&mut self, base: &Path) {
        for file in &mut self.watch_files {
            let path = Path::new(file);
            if path.is_relative() {
                *file = base.join(path).to_string_lossy().into_owned();
            }
        }
    }
}

/// Parse `reload` intervals: an integer with an `s`, `m` or `h` suffix
/// (plain integers are seconds).
fn parse_duration(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(raw.to_string());

    let (value, unit) = match raw.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => raw.split_at(idx),
        None => (raw, "s"),
    };
    let value: u64 = value.parse().map_err(|_| invalid())?;
    if value == 0 {
        return Err(invalid());
    }
    let secs = match unit {
        "s" => value,
        "m" => value * 60,
        "h" => value * 3600,
        _ => return Err(invalid()),
    };
    Ok(Duration::from_secs(secs))
}
