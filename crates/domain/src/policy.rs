use std::net::IpAddr;

use crate::cidr_filter::CidrFilter;

/// One atomic matching predicate inside a rule.
///
/// Only network containment exists today; the enum keeps the evaluator's
/// dispatch point open for further predicate kinds (ASN, geo).
#[derive(Debug, Clone)]
pub enum Policy {
    Network(CidrFilter),
}

impl Policy {
    pub fn matches(&self, client: IpAddr) -> bool {
        match self {
            Policy::Network(filter) => filter.contains(client),
        }
    }
}
