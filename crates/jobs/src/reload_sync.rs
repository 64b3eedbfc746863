use matchrelay_application::ports::RuleEnginePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Background job that periodically polls the watched rule sources.
///
///   - `Arc<Self>` spawn so the job owns its state across ticks
///   - First tick consumed immediately so no reload runs at startup
///     (the engine performs its initial load during construction)
///   - Cancelling the token terminates the loop; once the task joins, no
///     further reload can run
pub struct ReloadSyncJob {
    engine: Arc<dyn RuleEnginePort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ReloadSyncJob {
    pub fn new(engine: Arc<dyn RuleEnginePort>) -> Self {
        Self {
            engine,
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting rule reload job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ReloadSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.engine.reload().await {
                            error!(error = %e, "ReloadSyncJob: reload tick failed");
                        }
                    }
                }
            }
        })
    }
}
