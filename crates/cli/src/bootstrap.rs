use matchrelay_domain::{ConfigError, RelayConfig};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Read and parse the directive config; relative `match` paths resolve
/// against the config file's directory.
pub fn load_config(path: &str) -> Result<RelayConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
    let mut config = RelayConfig::parse(&contents)?;
    if let Some(base) = Path::new(path).parent() {
        config.resolve_watch_paths(base);
    }
    Ok(config)
}
