use async_trait::async_trait;
use matchrelay_domain::{RelayDecision, RelayError};
use std::net::{IpAddr, SocketAddr};

#[async_trait]
pub trait RuleEnginePort: Send + Sync {
    /// Evaluate a query against the currently published table.
    ///
    /// Lock-free read path: never blocks, never fails. An address that
    /// matches nothing simply falls through.
    fn evaluate(&self, client: IpAddr, name: &str) -> RelayDecision;

    /// Re-read the watched sources and republish the table if any of them
    /// changed. A source read failure abandons the whole tick and leaves
    /// the previous table authoritative.
    async fn reload(&self) -> Result<(), RelayError>;

    /// Monotonic snapshot generation; bumps only when a new table is
    /// published.
    fn generation(&self) -> u64;

    /// Upstream addresses queries are relayed to, independent of which
    /// zone matched.
    fn relay_targets(&self) -> Vec<SocketAddr>;
}
