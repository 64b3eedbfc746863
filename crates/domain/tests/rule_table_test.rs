use matchrelay_domain::{
    CidrFilter, DomainSuffixSet, MatchMode, Policy, RelayDecision, Rule, RuleTable,
};
use std::net::IpAddr;
use std::sync::Arc;

fn net_policy(token: &str) -> Policy {
    Policy::Network(CidrFilter::build(&[token]).unwrap())
}

fn zones(suffixes: &[&str]) -> Vec<Arc<str>> {
    suffixes.iter().map(|z| Arc::from(*z)).collect()
}

fn ip(addr: &str) -> IpAddr {
    addr.parse().unwrap()
}

fn zone_cidr_table(global_zones: &[&str], rules: Vec<Rule>) -> RuleTable {
    RuleTable::new(rules, DomainSuffixSet::new(), zones(global_zones), vec![])
}

#[test]
fn test_mode_is_fixed_at_build_time() {
    let mut domains = DomainSuffixSet::new();
    domains.insert("example.com", "");
    let domain_table = RuleTable::new(vec![], domains, vec![], vec![]);
    assert_eq!(domain_table.mode(), MatchMode::DomainSuffix);

    let cidr_table = zone_cidr_table(
        &["example.org."],
        vec![Rule::new(vec![], vec![net_policy("*")])],
    );
    assert_eq!(cidr_table.mode(), MatchMode::ZoneCidr);
}

#[test]
fn test_wildcard_policy_relays_any_source_address() {
    let table = zone_cidr_table(&["."], vec![Rule::new(vec![], vec![net_policy("*")])]);

    assert!(table.evaluate(ip("203.0.113.9"), "host.example.net.").is_relay());
    assert!(table.evaluate(ip("2001:db8::42"), "host.example.net.").is_relay());
}

#[test]
fn test_zone_and_cidr_must_both_match() {
    let table = zone_cidr_table(
        &["example.org."],
        vec![Rule::new(vec![], vec![net_policy("10.0.0.0/8")])],
    );

    assert_eq!(
        table.evaluate(ip("10.1.2.3"), "foo.example.org."),
        RelayDecision::Relay {
            zone: Some(Arc::from("example.org."))
        }
    );
    assert_eq!(
        table.evaluate(ip("192.168.1.1"), "foo.example.org."),
        RelayDecision::Continue
    );
    assert_eq!(
        table.evaluate(ip("10.1.2.3"), "foo.example.net."),
        RelayDecision::Continue
    );
}

#[test]
fn test_all_rules_are_tried_not_just_the_first_zone_match() {
    // First rule zone-matches but its CIDR misses; the wildcard rule after
    // it must still get its turn.
    let table = zone_cidr_table(
        &["example.org."],
        vec![
            Rule::new(vec![], vec![net_policy("172.16.0.0/12")]),
            Rule::new(vec![], vec![net_policy("*")]),
        ],
    );

    assert!(table.evaluate(ip("10.1.2.3"), "foo.example.org.").is_relay());
}

#[test]
fn test_rule_order_first_match_wins() {
    let table = zone_cidr_table(
        &["a.example.", "b.example."],
        vec![
            Rule::new(zones(&["a.example."]), vec![net_policy("*")]),
            Rule::new(zones(&["b.example."]), vec![net_policy("*")]),
        ],
    );

    assert_eq!(
        table.evaluate(ip("10.0.0.1"), "www.a.example."),
        RelayDecision::Relay {
            zone: Some(Arc::from("a.example."))
        }
    );
}

#[test]
fn test_longest_zone_suffix_wins() {
    let table = zone_cidr_table(
        &["example.org.", "deep.example.org."],
        vec![Rule::new(vec![], vec![net_policy("*")])],
    );

    assert_eq!(
        table.evaluate(ip("10.0.0.1"), "www.deep.example.org."),
        RelayDecision::Relay {
            zone: Some(Arc::from("deep.example.org."))
        }
    );
}

#[test]
fn test_zone_matching_is_case_insensitive_and_dot_normalized() {
    let table = zone_cidr_table(
        &["Example.ORG."],
        vec![Rule::new(vec![], vec![net_policy("*")])],
    );

    assert!(table.evaluate(ip("10.0.0.1"), "FOO.example.org").is_relay());
}

#[test]
fn test_zone_suffix_requires_label_boundary() {
    let table = zone_cidr_table(
        &["example.org."],
        vec![Rule::new(vec![], vec![net_policy("*")])],
    );

    assert_eq!(
        table.evaluate(ip("10.0.0.1"), "notexample.org."),
        RelayDecision::Continue
    );
}

#[test]
fn test_empty_name_and_empty_zones_fall_through() {
    let table = zone_cidr_table(&[], vec![Rule::new(vec![], vec![net_policy("*")])]);

    assert_eq!(table.evaluate(ip("10.0.0.1"), ""), RelayDecision::Continue);
    assert_eq!(
        table.evaluate(ip("10.0.0.1"), "foo.example.org."),
        RelayDecision::Continue
    );
}

#[test]
fn test_rules_without_policies_are_dropped_at_build() {
    let table = zone_cidr_table(
        &["example.org."],
        vec![Rule::new(vec![], vec![]), Rule::new(vec![], vec![net_policy("*")])],
    );

    assert_eq!(table.rules().len(), 1);
}

#[test]
fn test_domain_mode_ignores_source_address() {
    let mut domains = DomainSuffixSet::new();
    domains.insert("example.com", "");
    let table = RuleTable::new(vec![], domains, vec![], vec![]);

    assert_eq!(
        table.evaluate(ip("192.0.2.1"), "a.b.example.com."),
        RelayDecision::Relay { zone: None }
    );
    assert_eq!(
        table.evaluate(ip("192.0.2.1"), "example.com.evil.com."),
        RelayDecision::Continue
    );
}

#[test]
fn test_rule_scoped_zones_override_global_zones() {
    let table = zone_cidr_table(
        &["example.org."],
        vec![Rule::new(zones(&["internal.example."]), vec![net_policy("*")])],
    );

    assert_eq!(
        table.evaluate(ip("10.0.0.1"), "foo.example.org."),
        RelayDecision::Continue
    );
    assert!(table
        .evaluate(ip("10.0.0.1"), "db.internal.example.")
        .is_relay());
}
