// whois/mod.rs
// Ownership lookup for found hosts using the whois-service crate

use anyhow::Result;
use async_trait::async_trait;
use whois_service::WhoisClient;

/// One raw-text whois lookup for one host name.
///
/// Unlike geolocation, whois results are deliberately not cached: lookups are
/// keyed by host name rather than address, and each finding carries its own
/// ownership text.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Returns the raw whois text for `host`.
    async fn lookup(&self, host: &str) -> Result<String>;
}

/// Production whois collaborator.
///
/// The `whois-service` crate tries RDAP first and falls back to classic
/// whois, handling IANA bootstrap for server discovery. The client is cheap
/// to construct, so one is created per lookup.
pub struct WhoisServiceClient;

impl WhoisServiceClient {
    /// Creates the collaborator.
    pub fn new() -> Self {
        WhoisServiceClient
    }
}

impl Default for WhoisServiceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WhoisLookup for WhoisServiceClient {
    async fn lookup(&self, host: &str) -> Result<String> {
        let client = WhoisClient::new()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create whois client: {e}"))?;
        let response = client
            .lookup(host)
            .await
            .map_err(|e| anyhow::anyhow!("Whois lookup for {host} failed: {e}"))?;
        Ok(response.raw_data)
    }
}
