use std::net::IpAddr;
use std::sync::Arc;

use crate::policy::Policy;

/// Ordered policies with optional zone scoping.
///
/// A rule with an empty `zones` list is scoped by the enclosing table's
/// global zones instead of its own.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub zones: Vec<Arc<str>>,
    pub policies: Vec<Policy>,
}

impl Rule {
    pub fn new(zones: Vec<Arc<str>>, policies: Vec<Policy>) -> Self {
        Self { zones, policies }
    }

    /// First containing policy wins; policies are tried in configured order.
    pub fn matches_client(&self, client: IpAddr) -> bool {
        self.policies.iter().any(|policy| policy.matches(client))
    }
}
