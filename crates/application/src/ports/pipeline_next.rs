use async_trait::async_trait;
use bytes::Bytes;
use matchrelay_domain::{RelayError, RelayQuery};

#[async_trait]
pub trait PipelineNext: Send + Sync {
    /// Hand the query, unmodified, to the next stage of the surrounding
    /// resolution pipeline.
    async fn resolve(&self, query: &RelayQuery) -> Result<Bytes, RelayError>;
}
