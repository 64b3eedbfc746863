#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Unexpected token {0:?}; expect 'zone', 'net', 'domain', 'reload', 'relay' or 'match'")]
    UnknownDirective(String),

    #[error("Directive {0:?} is missing its argument")]
    EmptyDirective(String),

    #[error("Illegal CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid reload interval {0:?}")]
    InvalidDuration(String),

    #[error("Invalid relay target {0:?}: {1}")]
    InvalidRelayTarget(String, String),
}
