use arc_swap::ArcSwap;
use async_trait::async_trait;
use matchrelay_application::ports::RuleEnginePort;
use matchrelay_domain::config::parse_reload;
use matchrelay_domain::{RelayConfig, RelayDecision, RelayError, RuleTable};
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::fingerprint::{fingerprint, fingerprint_hex, Fingerprint};
use super::source::RuleSource;

/// Live rule engine: owns the published `RuleTable` snapshot and the
/// watched sources that can replace it.
///
/// Single-writer / many-reader: `reload` is only ever driven by the reload
/// job (one tick at a time), while `evaluate` runs on any number of
/// request tasks against an atomically swapped snapshot. A reader holds an
/// `Arc` to the table it loaded, so a snapshot is reclaimed only after the
/// last in-flight lookup drops it.
pub struct RelayRuleEngine {
    table: ArcSwap<RuleTable>,
    sources: Vec<Box<dyn RuleSource>>,
    fingerprints: Mutex<Vec<Fingerprint>>,
    generation: AtomicU64,
    zones: Vec<Arc<str>>,
    relay_targets: Vec<SocketAddr>,
}

impl std::fmt::Debug for RelayRuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayRuleEngine")
            .field("generation", &self.generation)
            .field("zones", &self.zones)
            .field("relay_targets", &self.relay_targets)
            .finish_non_exhaustive()
    }
}

impl RelayRuleEngine {
    /// Build the engine and perform the initial synchronous load.
    ///
    /// With watched sources the first table is parsed from their
    /// concatenated content and a read failure is fatal; without sources
    /// the static directives are the whole configuration.
    pub fn new(
        config: &RelayConfig,
        sources: Vec<Box<dyn RuleSource>>,
    ) -> Result<Self, RelayError> {
        let mut contents = Vec::with_capacity(sources.len());
        for source in &sources {
            contents.push(source.read()?);
        }
        let fingerprints: Vec<Fingerprint> = contents.iter().map(|b| fingerprint(b)).collect();

        let table = if sources.is_empty() {
            config.build_table()
        } else {
            Self::build_from_sources(&contents, &config.zones, &config.relay_targets)
        };

        info!(
            rules = table.rules().len(),
            domains = table.domains().len(),
            zones = table.zones().len(),
            sources = sources.len(),
            "Relay rule table loaded"
        );

        Ok(Self {
            table: ArcSwap::from_pointee(table),
            sources,
            fingerprints: Mutex::new(fingerprints),
            generation: AtomicU64::new(1),
            zones: config.zones.clone(),
            relay_targets: config.relay_targets.clone(),
        })
    }

    /// The currently published snapshot.
    pub fn table(&self) -> Arc<RuleTable> {
        self.table.load_full()
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }

    /// Concatenate source contents with a separator between files so a
    /// final line without a newline cannot glue onto the next file's first
    /// directive, then parse the batch.
    fn build_from_sources(
        contents: &[Vec<u8>],
        zones: &[Arc<str>],
        relay_targets: &[SocketAddr],
    ) -> RuleTable {
        let mut buf = Vec::new();
        for bytes in contents {
            buf.extend_from_slice(bytes);
            buf.push(b'\n');
        }
        let text = String::from_utf8_lossy(&buf);
        let parse = parse_reload(&text);
        for token in &parse.dropped {
            warn!(token = %token, "Illegal CIDR notation in rule source, policy dropped");
        }
        RuleTable::new(
            parse.rules,
            parse.domains,
            zones.to_vec(),
            relay_targets.to_vec(),
        )
    }
}

#[async_trait]
impl RuleEnginePort for RelayRuleEngine {
    fn evaluate(&self, client: IpAddr, name: &str) -> RelayDecision {
        self.table.load().evaluate(client, name)
    }

    async fn reload(&self) -> Result<(), RelayError> {
        if self.sources.is_empty() {
            return Ok(());
        }

        let mut contents = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let bytes = source.read().map_err(|e| {
                warn!(source = source.id(), error = %e, "Rule source unreadable, keeping current table");
                e
            })?;
            contents.push(bytes);
        }

        let mut fingerprints = self.fingerprints.lock().await;
        let mut changed = false;
        for (i, bytes) in contents.iter().enumerate() {
            let fp = fingerprint(bytes);
            if fingerprints[i] != fp {
                info!(
                    source = self.sources[i].id(),
                    fingerprint = %fingerprint_hex(&fp),
                    "Rule source changed"
                );
                fingerprints[i] = fp;
                changed = true;
            }
        }
        if !changed {
            debug!("Rule sources unchanged, keeping current table");
            return Ok(());
        }

        let table = Self::build_from_sources(&contents, &self.zones, &self.relay_targets);
        info!(
            rules = table.rules().len(),
            domains = table.domains().len(),
            generation = self.generation.load(Ordering::SeqCst) + 1,
            "Relay rule table republished"
        );
        self.table.store(Arc::new(table));
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn relay_targets(&self) -> Vec<SocketAddr> {
        self.relay_targets.clone()
    }
}
