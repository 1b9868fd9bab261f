//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application, including timeouts and well-known resolver addresses.

use std::net::{IpAddr, Ipv4Addr};

/// DNS query timeout in seconds.
///
/// Brute-force candidates are probed against arbitrary authoritative servers,
/// some of which silently drop queries for names they do not serve. 15s keeps
/// slow-but-honest servers in play; anything slower is treated as no response.
pub const DNS_TIMEOUT_SECS: u64 = 15;

/// Default number of brute-force workers per server pass.
pub const DEFAULT_WORKER_COUNT: usize = 5;

/// Resolvers used to discover a domain's NS and SOA records when no explicit
/// name-server override is configured.
pub const DEFAULT_RESOLVERS: [IpAddr; 2] = [
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)),
];

/// Public resolver consulted when a SOA mname has no A record visible through
/// the primary discovery path (hidden-primary deployments).
pub const FALLBACK_RESOLVER: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));

/// HTTP timeout for geolocation lookups in seconds.
pub const GEO_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default geolocation JSON endpoint; the IP address is appended as the last
/// path segment.
pub const DEFAULT_GEO_ENDPOINT: &str = "https://freegeoip.app/json";

/// Interval between progress log lines during a brute-force pass, in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;
