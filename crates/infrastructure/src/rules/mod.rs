mod engine;
mod fingerprint;
mod source;

pub use engine::RelayRuleEngine;
pub use fingerprint::{fingerprint, fingerprint_hex, Fingerprint};
pub use source::{FileRuleSource, RuleSource};
