//! subdomain_recon library: subdomain enumeration functionality
//!
//! This library discovers subdomains of a target domain by locating its
//! authoritative and SOA-derived name servers, attempting a zone transfer
//! against them, and falling back to wordlist brute forcing with optional
//! whois and geolocation enrichment per finding.
//!
//! # Example
//!
//! ```no_run
//! use subdomain_recon::{run_enumeration, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".into(),
//!     wordlist: Some(PathBuf::from("words.txt")),
//!     workers: 5,
//!     ..Default::default()
//! };
//!
//! let report = run_enumeration(config).await?;
//! println!("Found {} host(s) in {:.1}s", report.hosts.len(), report.elapsed_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod dns;
pub mod engine;
pub mod error_handling;
pub mod geo;
pub mod initialization;
pub mod nameserver;
pub mod whois;
pub mod wordlist;
pub mod zone;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, ProbeMode};
pub use error_handling::RunError;
pub use run::{run_enumeration, run_with_collaborators, EnumerationReport};

// Internal run module (contains the enumeration orchestration)
mod run {
    use std::sync::Arc;
    use std::time::Duration;

    use log::{debug, info};
    use tokio_util::sync::CancellationToken;

    use crate::app::print_error_statistics;
    use crate::config::{Config, ProbeMode, DEFAULT_RESOLVERS, DNS_TIMEOUT_SECS, FALLBACK_RESOLVER};
    use crate::dns::{DnsQuery, HickoryAdapter};
    use crate::engine::{BruteForceEngine, FoundHost};
    use crate::error_handling::{ErrorType, ProcessingStats, RunError};
    use crate::geo::{GeoCache, GeoLookup, HttpGeoClient};
    use crate::nameserver::{NameServer, NameServerResolver};
    use crate::whois::{WhoisLookup, WhoisServiceClient};
    use crate::wordlist::load_wordlist;
    use crate::zone::{try_zone_transfer, ZoneReport};

    /// Results of one enumeration run.
    #[derive(Debug, Clone)]
    pub struct EnumerationReport {
        /// Domain that was enumerated.
        pub domain: String,
        /// Name servers the run worked with.
        pub servers: Vec<NameServer>,
        /// Classified zone records, when any probed server allowed a transfer.
        pub zone: Option<ZoneReport>,
        /// Deduplicated brute-force findings.
        pub hosts: Vec<FoundHost>,
        /// Number of candidate labels in the wordlist.
        pub candidates: usize,
        /// Elapsed time in seconds.
        pub elapsed_seconds: f64,
    }

    /// Runs an enumeration with the production collaborators.
    ///
    /// This is the main entry point for the library: it builds the hickory
    /// DNS adapter and, when enabled, the whois and geolocation
    /// collaborators, then delegates to [`run_with_collaborators`].
    ///
    /// # Errors
    ///
    /// Returns the distinguished run-level outcomes: no wordlist configured,
    /// wordlist unreadable, no servers resolvable, or collaborator
    /// initialization failure. Everything else (refused transfers, candidate
    /// timeouts, enrichment failures) is absorbed into the report.
    pub async fn run_enumeration(config: Config) -> Result<EnumerationReport, RunError> {
        let dns: Arc<dyn DnsQuery> =
            Arc::new(HickoryAdapter::new(Duration::from_secs(DNS_TIMEOUT_SECS)));

        let whois: Option<Arc<dyn WhoisLookup>> = if config.enable_whois {
            Some(Arc::new(WhoisServiceClient::new()))
        } else {
            None
        };

        let geo = if config.enable_geo {
            let client = HttpGeoClient::new(config.geo_endpoint.clone())?;
            Some(Arc::new(GeoCache::new(
                Arc::new(client) as Arc<dyn GeoLookup>
            )))
        } else {
            None
        };

        run_with_collaborators(config, dns, whois, geo).await
    }

    /// Runs an enumeration with explicit collaborators.
    ///
    /// Exposed so callers (and tests) can substitute their own DNS, whois or
    /// geolocation implementations.
    pub async fn run_with_collaborators(
        config: Config,
        dns: Arc<dyn DnsQuery>,
        whois: Option<Arc<dyn WhoisLookup>>,
        geo: Option<Arc<GeoCache>>,
    ) -> Result<EnumerationReport, RunError> {
        // A run without a wordlist is refused outright, even though a zone
        // transfer alone would not need one
        let words = match &config.wordlist {
            Some(path) => load_wordlist(path).await?,
            None => return Err(RunError::MissingWordlist),
        };

        let start_time = std::time::Instant::now();
        let stats = Arc::new(ProcessingStats::new());

        info!("Resolving name servers for {}", config.domain);
        let servers: Vec<NameServer> = if config.name_servers.is_empty() {
            let resolver = NameServerResolver::new(
                Arc::clone(&dns),
                DEFAULT_RESOLVERS.to_vec(),
                FALLBACK_RESOLVER,
            );
            resolver
                .server_set(&config.domain)
                .await
                .map_err(|_| RunError::NoServers {
                    domain: config.domain.clone(),
                })?
        } else {
            config
                .name_servers
                .iter()
                .copied()
                .map(NameServer::from_ip)
                .collect()
        };
        info!(
            "Working with {} name server(s) for {}",
            servers.len(),
            config.domain
        );

        let selected: Vec<NameServer> = match config.probe_mode {
            ProbeMode::FirstServerOnly => servers.iter().take(1).cloned().collect(),
            ProbeMode::AllServers => servers.clone(),
        };

        // Cheap path first: one permitted transfer hands over the whole zone
        // for that server, and only refused servers are brute forced
        let mut zone: Option<ZoneReport> = None;
        let mut brute_targets: Vec<NameServer> = Vec::new();
        for server in &selected {
            match try_zone_transfer(dns.as_ref(), &config.domain, server.ip).await {
                Ok(report) => {
                    info!(
                        "Zone transfer of {} succeeded against {} ({} records)",
                        config.domain,
                        server,
                        report.len()
                    );
                    match zone.as_mut() {
                        Some(merged) => merged.merge(report),
                        None => zone = Some(report),
                    }
                }
                Err(refused) => {
                    stats.increment_error(ErrorType::TransferRefused);
                    debug!("{refused}");
                    brute_targets.push(server.clone());
                }
            }
        }

        let hosts = if brute_targets.is_empty() {
            Vec::new()
        } else {
            let mut engine = BruteForceEngine::new(
                Arc::clone(&dns),
                config.workers,
                Arc::clone(&stats),
            );
            if let Some(whois) = whois {
                engine = engine.with_whois(whois);
            }
            if let Some(geo) = geo {
                engine = engine.with_geo(geo);
            }

            let cancel = CancellationToken::new();
            engine
                .run(
                    &config.domain,
                    &words,
                    &brute_targets,
                    config.probe_mode,
                    &cancel,
                )
                .await
        };

        print_error_statistics(&stats);

        Ok(EnumerationReport {
            domain: config.domain,
            servers,
            zone,
            hosts,
            candidates: words.len(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
