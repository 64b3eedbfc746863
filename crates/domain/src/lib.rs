//! Matchrelay Domain Layer
pub mod cidr_filter;
pub mod config;
pub mod decision;
pub mod domain_set;
pub mod errors;
pub mod policy;
pub mod relay_query;
pub mod rule;
pub mod rule_table;

pub use cidr_filter::CidrFilter;
pub use config::{ConfigError, RelayConfig};
pub use decision::RelayDecision;
pub use domain_set::DomainSuffixSet;
pub use errors::RelayError;
pub use policy::Policy;
pub use relay_query::RelayQuery;
pub use rule::Rule;
pub use rule_table::{MatchMode, RuleTable};
