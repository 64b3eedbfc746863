use clap::Parser;
use matchrelay_application::ports::RuleEnginePort;
use matchrelay_domain::RelayDecision;
use matchrelay_infrastructure::rules::{FileRuleSource, RelayRuleEngine, RuleSource};
use matchrelay_jobs::ReloadSyncJob;
use std::net::IpAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;

#[derive(Parser)]
#[command(name = "matchrelay")]
#[command(version)]
#[command(about = "Zone and source-network relay routing for DNS pipelines")]
struct Cli {
    /// Rule configuration file (directive text)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: String,

    /// Evaluate one query name against the loaded table, print the
    /// decision and exit
    #[arg(long, requires = "client")]
    query: Option<String>,

    /// Client source address for --query
    #[arg(long)]
    client: Option<IpAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bootstrap::init_logging(&cli.log_level);

    let config = bootstrap::load_config(&cli.config)?;
    let sources: Vec<Box<dyn RuleSource>> = config
        .watch_files
        .iter()
        .map(|path| Box::new(FileRuleSource::new(path.clone())) as Box<dyn RuleSource>)
        .collect();
    let engine = Arc::new(RelayRuleEngine::new(&config, sources)?);

    if let (Some(name), Some(client)) = (cli.query, cli.client) {
        match engine.evaluate(client, &name) {
            RelayDecision::Relay { zone } => {
                println!("relay zone={}", zone.as_deref().unwrap_or("-"));
            }
            RelayDecision::Continue => println!("continue"),
        }
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let reload_handle = match config.reload_interval {
        Some(interval) if engine.has_sources() => {
            let job = Arc::new(
                ReloadSyncJob::new(engine.clone())
                    .with_interval(interval)
                    .with_cancellation(shutdown.clone()),
            );
            Some(job.start())
        }
        _ => {
            info!("No reload interval or watched sources configured, rules are static");
            None
        }
    };

    info!("matchrelay ready, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    shutdown.cancel();
    if let Some(handle) = reload_handle {
        handle.await?;
    }
    info!("Shutdown complete");
    Ok(())
}
