//! Concurrent brute-force resolution engine.
//!
//! The wordlist is partitioned round-robin across a fixed worker count; each
//! server pass spawns every worker at once and drains them through
//! `FuturesUnordered`, so the pool genuinely runs in parallel. Server passes
//! run sequentially because the enrichment collaborators are shared and not
//! safe under unbounded concurrency; within a pass, only the worker pool
//! issues DNS queries.

mod partition;
mod results;

// Re-export public API
pub use partition::partition_words;
pub use results::{FoundHost, FoundHostSet, HostKey};

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, shutdown_gracefully};
use crate::config::{ProbeMode, LOGGING_INTERVAL_SECS};
use crate::dns::{DnsQuery, QueryError, RecordData, RecordKind, ResponseCode};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::geo::GeoCache;
use crate::nameserver::NameServer;
use crate::whois::WhoisLookup;

/// Shared state handed to every worker of a run.
struct WorkerContext {
    dns: Arc<dyn DnsQuery>,
    whois: Option<Arc<dyn WhoisLookup>>,
    geo: Option<Arc<GeoCache>>,
    stats: Arc<ProcessingStats>,
    results: Arc<Mutex<FoundHostSet>>,
    attempted: Arc<AtomicUsize>,
}

/// Partitioned, worker-based subdomain prober.
pub struct BruteForceEngine {
    dns: Arc<dyn DnsQuery>,
    whois: Option<Arc<dyn WhoisLookup>>,
    geo: Option<Arc<GeoCache>>,
    worker_count: usize,
    stats: Arc<ProcessingStats>,
}

impl BruteForceEngine {
    /// Creates an engine without enrichment.
    pub fn new(dns: Arc<dyn DnsQuery>, worker_count: usize, stats: Arc<ProcessingStats>) -> Self {
        BruteForceEngine {
            dns,
            whois: None,
            geo: None,
            worker_count: worker_count.max(1),
            stats,
        }
    }

    /// Enables whois enrichment for each finding.
    pub fn with_whois(mut self, whois: Arc<dyn WhoisLookup>) -> Self {
        self.whois = Some(whois);
        self
    }

    /// Enables geolocation enrichment for each resolved address.
    pub fn with_geo(mut self, geo: Arc<GeoCache>) -> Self {
        self.geo = Some(geo);
        self
    }

    /// Probes `words` as `<word>.<domain>` candidates against the selected
    /// servers, returning the deduplicated findings.
    ///
    /// The same partitioning is reused for every server pass and all passes
    /// share one accumulating result set, so a subdomain answering
    /// identically from two servers is a single finding. Cancellation is
    /// cooperative: workers stop between candidates, and in-flight queries
    /// end at their own timeout.
    pub async fn run(
        &self,
        domain: &str,
        words: &[String],
        servers: &[NameServer],
        mode: ProbeMode,
        cancel: &CancellationToken,
    ) -> Vec<FoundHost> {
        if words.is_empty() || servers.is_empty() {
            return Vec::new();
        }

        let targets = match mode {
            ProbeMode::FirstServerOnly => &servers[..1],
            ProbeMode::AllServers => servers,
        };

        let partitions = Arc::new(partition_words(words, self.worker_count));
        let context = Arc::new(WorkerContext {
            dns: Arc::clone(&self.dns),
            whois: self.whois.clone(),
            geo: self.geo.clone(),
            stats: Arc::clone(&self.stats),
            results: Arc::new(Mutex::new(FoundHostSet::new())),
            attempted: Arc::new(AtomicUsize::new(0)),
        });

        let start_time = std::time::Instant::now();
        let progress_cancel = cancel.child_token();
        let progress_task = spawn_progress_logger(
            start_time,
            Arc::clone(&context.attempted),
            progress_cancel.clone(),
        );

        for server in targets {
            if cancel.is_cancelled() {
                info!("Brute force cancelled before probing {server}");
                break;
            }
            info!(
                "Probing {} candidates against {} with {} workers",
                words.len(),
                server,
                partitions.len()
            );
            self.probe_server(domain, server.ip, &partitions, &context, cancel)
                .await;
        }

        shutdown_gracefully(progress_cancel, Some(progress_task)).await;
        log_progress(start_time, &context.attempted);

        let results = context.results.lock().unwrap_or_else(|e| e.into_inner());
        results.hosts().to_vec()
    }

    /// Runs one full worker-pool pass against a single server.
    async fn probe_server(
        &self,
        domain: &str,
        server: IpAddr,
        partitions: &Arc<Vec<Vec<String>>>,
        context: &Arc<WorkerContext>,
        cancel: &CancellationToken,
    ) {
        let mut workers = FuturesUnordered::new();
        for worker_id in 0..partitions.len() {
            let context = Arc::clone(context);
            let partitions = Arc::clone(partitions);
            let domain = domain.to_string();
            let cancel = cancel.child_token();
            workers.push(tokio::spawn(async move {
                probe_candidates(context, domain, server, partitions, worker_id, cancel).await;
            }));
        }

        while let Some(joined) = workers.next().await {
            if let Err(join_error) = joined {
                warn!("Brute-force worker panicked: {join_error:?}");
            }
        }
    }
}

/// Worker body: probes one partition's candidates in wordlist order.
async fn probe_candidates(
    context: Arc<WorkerContext>,
    domain: String,
    server: IpAddr,
    partitions: Arc<Vec<Vec<String>>>,
    worker_id: usize,
    cancel: CancellationToken,
) {
    for word in &partitions[worker_id] {
        if cancel.is_cancelled() {
            return;
        }

        let candidate = format!("{word}.{domain}");
        context.attempted.fetch_add(1, Ordering::Relaxed);

        let response = match context.dns.query(&candidate, RecordKind::A, server).await {
            Ok(response) => response,
            Err(QueryError::Timeout { .. }) => {
                context.stats.increment_error(ErrorType::QueryTimeout);
                warn!("DNS server {server} did not respond for {candidate}");
                continue;
            }
            Err(e) => {
                context.stats.increment_error(ErrorType::QueryFailure);
                warn!("Query for {candidate} against {server} failed: {e}");
                continue;
            }
        };

        if response.code != ResponseCode::NoError {
            debug!("{candidate}: {} from {server}", response.code);
            continue;
        }

        for answer in &response.answers {
            let (kind, address) = match &answer.data {
                RecordData::A(ip) => (RecordKind::A, ip.to_string()),
                other => (other.kind(), other.value()),
            };

            let whois_text = match &context.whois {
                Some(client) => {
                    info!("Retrieving whois information for {candidate}");
                    match client.lookup(&candidate).await {
                        Ok(text) => Some(text),
                        Err(e) => {
                            context.stats.increment_error(ErrorType::WhoisLookupError);
                            warn!("{e}");
                            None
                        }
                    }
                }
                None => None,
            };

            let geo = match &context.geo {
                Some(cache) => {
                    let payload = cache.lookup(&address).await;
                    if payload.is_none() && address.parse::<IpAddr>().is_ok() {
                        context.stats.increment_error(ErrorType::GeoLookupError);
                    }
                    payload
                }
                None => None,
            };

            let host = FoundHost {
                name: candidate.clone(),
                address: address.clone(),
                kind,
                geo,
                whois: whois_text,
            };
            {
                let mut results = context.results.lock().unwrap_or_else(|e| e.into_inner());
                if results.insert(host) {
                    info!("Found {candidate} -> {address} [{kind}]");
                }
            }
        }
    }
}

fn spawn_progress_logger(
    start_time: std::time::Instant,
    attempted: Arc<AtomicUsize>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(LOGGING_INTERVAL_SECS));
        // The first tick fires immediately; skip it so an empty run stays quiet
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(start_time, &attempted);
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
    })
}
