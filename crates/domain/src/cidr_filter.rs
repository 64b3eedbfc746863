use ipnetwork::IpNetwork;
use std::net::IpAddr;

use crate::errors::RelayError;

/// Immutable set of network prefixes backing a single `net` policy.
///
/// Built once from CIDR literals (or the `*` wildcard) and never mutated
/// afterwards; configuration changes rebuild the filter together with the
/// rest of the rule table and swap the whole snapshot.
#[derive(Debug, Clone)]
pub struct CidrFilter {
    networks: Vec<IpNetwork>,
}

impl CidrFilter {
    /// Build a filter from `cidr`, bare-IP or `*` tokens.
    ///
    /// `*` inserts both the all-IPv4 and all-IPv6 networks. A bare IP is
    /// normalized to `/32` (IPv4) or `/128` (IPv6) before insertion.
    pub fn build(tokens: &[&str]) -> Result<Self, RelayError> {
        if tokens.is_empty() {
            return Err(RelayError::InvalidCidr("<empty>".to_string()));
        }

        let mut networks = Vec::with_capacity(tokens.len());
        for raw in tokens {
            let token = raw.to_ascii_lowercase();
            if token == "*" {
                networks.push("0.0.0.0/0".parse::<IpNetwork>().unwrap());
                networks.push("::/0".parse::<IpNetwork>().unwrap());
                continue;
            }

            let network: IpNetwork = normalize(&token)
                .parse()
                .map_err(|_| RelayError::InvalidCidr((*raw).to_string()))?;
            networks.push(network);
        }

        Ok(Self { networks })
    }

    /// Set test: true when any inserted network contains `ip`.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.networks.iter().any(|network| network.contains(ip))
    }
}

/// Append `/32` to a bare IPv4 literal and `/128` to a bare IPv6 literal.
fn normalize(raw: &str) -> String {
    if raw.contains('/') {
        return raw.to_string();
    }
    if raw.contains(':') {
        return format!("{raw}/128");
    }
    format!("{raw}/32")
}
