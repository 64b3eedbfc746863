mod pipeline_next;
mod relay_dispatcher;
mod rule_engine;

pub use pipeline_next::PipelineNext;
pub use relay_dispatcher::RelayDispatcher;
pub use rule_engine::RuleEnginePort;

// Re-export for convenience
pub use matchrelay_domain::RelayQuery;
