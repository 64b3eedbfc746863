use std::sync::Arc;

/// Outcome of evaluating one query against the live rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayDecision {
    /// Hand the query to the upstream relay. `zone` carries the matched
    /// zone suffix when the zone/CIDR strategy produced the match; it is
    /// observability data and never changes target selection.
    Relay { zone: Option<Arc<str>> },
    /// Fall through to the next stage of the resolution pipeline.
    Continue,
}

impl RelayDecision {
    pub fn is_relay(&self) -> bool {
        matches!(self, RelayDecision::Relay { .. })
    }
}
