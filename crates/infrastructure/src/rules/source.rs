use matchrelay_domain::RelayError;

/// One watched rule source. File-backed in production; tests substitute
/// in-memory fakes.
pub trait RuleSource: Send + Sync {
    /// Stable identifier used in log lines and error messages.
    fn id(&self) -> &str;

    /// Current raw content. Read in full on every poll; change detection
    /// happens on the fingerprint, not here.
    fn read(&self) -> Result<Vec<u8>, RelayError>;
}

/// Rule source polled from a file path.
pub struct FileRuleSource {
    path: String,
}

impl FileRuleSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RuleSource for FileRuleSource {
    fn id(&self) -> &str {
        &self.path
    }

    fn read(&self) -> Result<Vec<u8>, RelayError> {
        std::fs::read(&self.path)
            .map_err(|e| RelayError::SourceRead(self.path.clone(), e.to_string()))
    }
}
