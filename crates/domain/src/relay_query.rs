use bytes::Bytes;
use std::net::IpAddr;
use std::sync::Arc;

/// Read-only view of an in-flight query: the fully-qualified name with
/// trailing separator, the normalized requester address and the original
/// wire message handed over untouched on relay or fall-through.
#[derive(Debug, Clone)]
pub struct RelayQuery {
    pub name: Arc<str>,
    pub client: IpAddr,
    pub message: Bytes,
}

impl RelayQuery {
    pub fn new(name: impl Into<Arc<str>>, client: IpAddr, message: Bytes) -> Self {
        Self {
            name: name.into(),
            client,
            message,
        }
    }
}
