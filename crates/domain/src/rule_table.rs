use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::decision::RelayDecision;
use crate::domain_set::DomainSuffixSet;
use crate::rule::Rule;

/// Which of the two matching strategies a table was built for.
///
/// The strategy is fixed when the table is built: any `domain` entries
/// select suffix matching on the query name alone, otherwise queries match
/// on zone plus source network. Keeping the mode explicit on the snapshot
/// rules out silent strategy switches between two queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    DomainSuffix,
    ZoneCidr,
}

/// One complete, immutable configuration snapshot.
///
/// The table is the unit of atomic replacement: every consumer reads one
/// internally consistent snapshot, never a partially updated one. Rule and
/// policy order is exactly the configured order.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    domains: DomainSuffixSet,
    zones: Vec<Arc<str>>,
    relay_targets: Vec<SocketAddr>,
    mode: MatchMode,
}

impl RuleTable {
    /// Assemble a snapshot, dropping rules that ended up with no policies.
    pub fn new(
        rules: Vec<Rule>,
        domains: DomainSuffixSet,
        zones: Vec<Arc<str>>,
        relay_targets: Vec<SocketAddr>,
    ) -> Self {
        let rules: Vec<Rule> = rules
            .into_iter()
            .filter(|rule| !rule.policies.is_empty())
            .collect();
        let mode = if domains.is_empty() {
            MatchMode::ZoneCidr
        } else {
            MatchMode::DomainSuffix
        };
        Self {
            rules,
            domains,
            zones,
            relay_targets,
            mode,
        }
    }

    /// Evaluate a query's source address and name against this snapshot.
    ///
    /// First match wins in both strategies; no match falls through to the
    /// next pipeline stage. Never fails: anything unmatchable is `Continue`.
    pub fn evaluate(&self, client: IpAddr, name: &str) -> RelayDecision {
        match self.mode {
            MatchMode::DomainSuffix => {
                if self.domains.matches_name(name) {
                    RelayDecision::Relay { zone: None }
                } else {
                    RelayDecision::Continue
                }
            }
            MatchMode::ZoneCidr => self.evaluate_zone_cidr(client, name),
        }
    }

    fn evaluate_zone_cidr(&self, client: IpAddr, name: &str) -> RelayDecision {
        if name.is_empty() {
            return RelayDecision::Continue;
        }
        for rule in &self.rules {
            let zones = if rule.zones.is_empty() {
                &self.zones
            } else {
                &rule.zones
            };
            let Some(zone) = match_zone(zones, name) else {
                continue;
            };
            if rule.matches_client(client) {
                return RelayDecision::Relay { zone: Some(zone) };
            }
        }
        RelayDecision::Continue
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn domains(&self) -> &DomainSuffixSet {
        &self.domains
    }

    pub fn zones(&self) -> &[Arc<str>] {
        &self.zones
    }

    pub fn relay_targets(&self) -> &[SocketAddr] {
        &self.relay_targets
    }
}

/// Longest configured zone suffix containing `name` wins. Comparison is
/// case-insensitive and trailing-dot-normalized; the root zone `.` contains
/// every name.
fn match_zone(zones: &[Arc<str>], name: &str) -> Option<Arc<str>> {
    let qname = normalize_fqdn(name);
    let mut best: Option<&Arc<str>> = None;
    for zone in zones {
        if !zone_contains(zone, &qname) {
            continue;
        }
        match best {
            None => best = Some(zone),
            Some(current) if zone.len() > current.len() => best = Some(zone),
            _ => {}
        }
    }
    best.cloned()
}

fn zone_contains(zone: &str, qname: &str) -> bool {
    let zone = normalize_fqdn(zone);
    if zone == "." {
        return true;
    }
    qname == zone || qname.ends_with(&format!(".{zone}"))
}

/// Lowercase and ensure a trailing dot.
pub fn normalize_fqdn(name: &str) -> String {
    let mut normalized = name.to_ascii_lowercase();
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    normalized
}
