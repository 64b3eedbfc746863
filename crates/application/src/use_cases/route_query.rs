use crate::ports::{PipelineNext, RelayDispatcher, RuleEnginePort};
use bytes::Bytes;
use matchrelay_domain::{RelayDecision, RelayError, RelayQuery};
use std::sync::Arc;
use tracing::debug;

/// What happened to one routed query, for observability.
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    pub response: Bytes,
    pub relayed: bool,
    pub matched_zone: Option<Arc<str>>,
}

/// Routes one query: relay upstream on a rule match, otherwise continue
/// down the pipeline.
pub struct RouteQueryUseCase {
    engine: Arc<dyn RuleEnginePort>,
    dispatcher: Arc<dyn RelayDispatcher>,
    next: Arc<dyn PipelineNext>,
}

impl RouteQueryUseCase {
    pub fn new(
        engine: Arc<dyn RuleEnginePort>,
        dispatcher: Arc<dyn RelayDispatcher>,
        next: Arc<dyn PipelineNext>,
    ) -> Self {
        Self {
            engine,
            dispatcher,
            next,
        }
    }

    /// Evaluate and forward. Dispatch failures propagate untouched; retry
    /// policy belongs to the dispatcher's caller, not here.
    pub async fn execute(&self, query: &RelayQuery) -> Result<RouteOutcome, RelayError> {
        match self.engine.evaluate(query.client, &query.name) {
            RelayDecision::Relay { zone } => {
                debug!(
                    name = %query.name,
                    client = %query.client,
                    zone = zone.as_deref().unwrap_or("-"),
                    "Relaying query upstream"
                );
                let targets = self.engine.relay_targets();
                if targets.is_empty() {
                    return Err(RelayError::NoRelayTargets);
                }
                let response = self.dispatcher.dispatch(query, &targets).await?;
                Ok(RouteOutcome {
                    response,
                    relayed: true,
                    matched_zone: zone,
                })
            }
            RelayDecision::Continue => {
                debug!(name = %query.name, "No relay match, continuing pipeline");
                let response = self.next.resolve(query).await?;
                Ok(RouteOutcome {
                    response,
                    relayed: false,
                    matched_zone: None,
                })
            }
        }
    }
}
