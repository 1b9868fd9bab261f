//! Geolocation enrichment.
//!
//! Resolved addresses are looked up against an HTTP JSON service and the
//! payloads cached per run: geolocation data does not change mid-scan, and
//! the external service should never be asked twice for the same address.

mod cache;
mod client;
mod types;

// Re-export public API
pub use cache::GeoCache;
pub use client::{GeoLookup, HttpGeoClient};
pub use types::GeoPayload;
