use async_trait::async_trait;
use bytes::Bytes;
use matchrelay_domain::{RelayError, RelayQuery};
use std::net::SocketAddr;

#[async_trait]
pub trait RelayDispatcher: Send + Sync {
    /// Forward the original query message to the configured upstreams and
    /// return the first answer. Targets are tried in order; there is no
    /// retry beyond the target list.
    async fn dispatch(
        &self,
        query: &RelayQuery,
        targets: &[SocketAddr],
    ) -> Result<Bytes, RelayError>;
}
