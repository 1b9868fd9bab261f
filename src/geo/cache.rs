//! Per-run geolocation cache.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Mutex;

use super::client::GeoLookup;
use super::types::GeoPayload;

/// Deduplicates geolocation lookups per address for the lifetime of one run.
///
/// The map lock is held across the network call, so concurrent workers asking
/// for the same address coalesce into a single external request. Failures are
/// returned as `None` and never cached; a later call may retry the network.
pub struct GeoCache {
    client: Arc<dyn GeoLookup>,
    entries: Mutex<HashMap<IpAddr, GeoPayload>>,
}

impl GeoCache {
    /// Creates an empty cache over the given collaborator.
    pub fn new(client: Arc<dyn GeoLookup>) -> Self {
        GeoCache {
            client,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up geolocation data for `address`.
    ///
    /// Non-address inputs (e.g. CNAME targets captured as values) return
    /// `None` without touching the network.
    pub async fn lookup(&self, address: &str) -> Option<GeoPayload> {
        let ip: IpAddr = address.parse().ok()?;

        let mut entries = self.entries.lock().await;
        if let Some(payload) = entries.get(&ip) {
            debug!("Geolocation for {ip} already requested this run, returning cached data");
            return Some(payload.clone());
        }

        match self.client.lookup(ip).await {
            Ok(payload) => {
                entries.insert(ip, payload.clone());
                Some(payload)
            }
            Err(e) => {
                warn!("Geolocation lookup for {ip} failed: {e}");
                None
            }
        }
    }

    /// Number of cached addresses.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache holds no entries yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStub {
        calls: AtomicUsize,
        fail_first: AtomicUsize,
    }

    impl CountingStub {
        fn new() -> Self {
            CountingStub {
                calls: AtomicUsize::new(0),
                fail_first: AtomicUsize::new(0),
            }
        }

        fn failing_once() -> Self {
            CountingStub {
                calls: AtomicUsize::new(0),
                fail_first: AtomicUsize::new(1),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GeoLookup for CountingStub {
        async fn lookup(&self, ip: IpAddr) -> Result<GeoPayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                n.checked_sub(1)
            }).is_ok()
            {
                return Err(anyhow!("service unreachable"));
            }
            Ok(GeoPayload {
                ip: Some(ip.to_string()),
                country_code: Some("US".into()),
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache() {
        let stub = Arc::new(CountingStub::new());
        let cache = GeoCache::new(Arc::clone(&stub) as Arc<dyn GeoLookup>);

        let first = cache.lookup("10.0.0.2").await.expect("first lookup");
        let second = cache.lookup("10.0.0.2").await.expect("second lookup");

        assert_eq!(stub.calls(), 1, "second lookup must not touch the network");
        assert_eq!(first, second);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_distinct_addresses_each_hit_network_once() {
        let stub = Arc::new(CountingStub::new());
        let cache = GeoCache::new(Arc::clone(&stub) as Arc<dyn GeoLookup>);

        cache.lookup("10.0.0.2").await.unwrap();
        cache.lookup("10.0.0.3").await.unwrap();
        cache.lookup("10.0.0.2").await.unwrap();

        assert_eq!(stub.calls(), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_non_address_input_never_calls_network() {
        let stub = Arc::new(CountingStub::new());
        let cache = GeoCache::new(Arc::clone(&stub) as Arc<dyn GeoLookup>);

        assert!(cache.lookup("web.example.test.").await.is_none());
        assert!(cache.lookup("").await.is_none());
        assert_eq!(stub.calls(), 0);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let stub = Arc::new(CountingStub::failing_once());
        let cache = GeoCache::new(Arc::clone(&stub) as Arc<dyn GeoLookup>);

        assert!(cache.lookup("10.0.0.2").await.is_none());
        assert!(cache.is_empty().await, "failure must not be cached");

        // A later call retries the network and succeeds
        let retried = cache.lookup("10.0.0.2").await;
        assert!(retried.is_some());
        assert_eq!(stub.calls(), 2);
    }
}
