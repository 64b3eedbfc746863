use async_trait::async_trait;
use bytes::Bytes;
use hickory_proto::op::Message;
use hickory_proto::op::UpdateMessage;
use matchrelay_application::ports::RelayDispatcher;
use matchrelay_domain::{RelayError, RelayQuery};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Single-shot UDP relay: forwards the original query bytes to the first
/// reachable target and returns the raw upstream answer.
///
/// Deliberately minimal. Health tracking, pooling and TCP fallback belong
/// to the full forwarding stack this engine plugs into.
pub struct UdpRelayDispatcher {
    timeout: Duration,
}

impl UdpRelayDispatcher {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn forward_to(
        &self,
        target: SocketAddr,
        message: &[u8],
        query_id: u16,
    ) -> Result<Bytes, RelayError> {
        let bind_addr: SocketAddr = if target.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| RelayError::Dispatch(format!("failed to bind UDP socket: {e}")))?;

        socket
            .send_to(message, target)
            .await
            .map_err(|e| RelayError::Dispatch(format!("failed to send to {target}: {e}")))?;

        let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let len = tokio::time::timeout(self.timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| RelayError::DispatchTimeout {
                target: target.to_string(),
            })?
            .map_err(|e| RelayError::Dispatch(format!("failed to receive from {target}: {e}")))?;

        let response = Message::from_vec(&buf[..len])
            .map_err(|e| RelayError::Dispatch(format!("malformed response from {target}: {e}")))?;
        if response.id() != query_id {
            return Err(RelayError::Dispatch(format!(
                "response id mismatch from {target}"
            )));
        }

        debug!(target = %target, bytes = len, "Relay response received");
        Ok(Bytes::copy_from_slice(&buf[..len]))
    }
}

impl Default for UdpRelayDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayDispatcher for UdpRelayDispatcher {
    async fn dispatch(
        &self,
        query: &RelayQuery,
        targets: &[SocketAddr],
    ) -> Result<Bytes, RelayError> {
        if targets.is_empty() {
            return Err(RelayError::NoRelayTargets);
        }

        let query_id = Message::from_vec(&query.message)
            .map_err(|e| RelayError::Dispatch(format!("malformed query message: {e}")))?
            .id();

        let mut last_err = RelayError::NoRelayTargets;
        for target in targets {
            match self.forward_to(*target, &query.message, query_id).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(target = %target, error = %e, "Relay dispatch attempt failed");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}
