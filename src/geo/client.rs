//! Geolocation HTTP collaborator.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::GEO_HTTP_TIMEOUT_SECS;
use crate::error_handling::InitializationError;

use super::types::GeoPayload;

/// One external geolocation lookup for one address.
///
/// Tests substitute call-counting stubs; production uses [`HttpGeoClient`].
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Looks up the payload for `ip`, or fails with a network/parse error.
    async fn lookup(&self, ip: IpAddr) -> Result<GeoPayload>;
}

/// Geolocation lookup against a freegeoip-style JSON endpoint: the address
/// is appended to the endpoint as the last path segment.
pub struct HttpGeoClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGeoClient {
    /// Creates a client for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, InitializationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(GEO_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(HttpGeoClient {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl GeoLookup for HttpGeoClient {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoPayload> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), ip);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("geolocation request failed")?
            .error_for_status()
            .context("geolocation service answered with an error status")?;
        let payload = response
            .json::<GeoPayload>()
            .await
            .context("geolocation payload could not be parsed")?;
        Ok(payload)
    }
}
