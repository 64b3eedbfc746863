use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RelayError {
    #[error("Illegal CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Failed to read rule source {0}: {1}")]
    SourceRead(String, String),

    #[error("Invalid query name: {0}")]
    InvalidQueryName(String),

    #[error("Relay dispatch failed: {0}")]
    Dispatch(String),

    #[error("Relay dispatch timeout contacting {target}")]
    DispatchTimeout { target: String },

    #[error("No relay targets configured")]
    NoRelayTargets,
}
