//! Name-server discovery.
//!
//! Given a target domain, this module determines which servers to probe:
//! the domain's NS targets resolved to addresses, or failing that the
//! SOA-derived primary masters, with a public-resolver fallback for masters
//! whose own A record is not visible through the discovery path.

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::dns::{DnsQuery, DnsResponse, RecordData, RecordKind, ResponseCode};

/// A discovered name server: address plus the name it was reached through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameServer {
    /// Host name the address was resolved from, if discovery knows it.
    pub hostname: Option<String>,
    /// Address to query.
    pub ip: IpAddr,
}

impl NameServer {
    /// A server known only by address (explicit override lists).
    pub fn from_ip(ip: IpAddr) -> Self {
        NameServer {
            hostname: None,
            ip,
        }
    }
}

impl std::fmt::Display for NameServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.hostname {
            Some(hostname) => write!(f, "{} ({})", self.ip, hostname),
            None => write!(f, "{}", self.ip),
        }
    }
}

/// Discovery failure: no server set could be assembled.
///
/// Successful resolution never returns an empty list; absence of servers is
/// always this error.
#[derive(Error, Debug)]
#[error("no name servers found for {domain}")]
pub struct ResolutionError {
    /// Domain whose discovery failed.
    pub domain: String,
}

/// Resolves the set of servers to probe for a domain.
///
/// The discovery resolvers and the public fallback are explicit values held
/// by this struct, so concurrent resolution against different server sets
/// cannot interfere.
pub struct NameServerResolver {
    dns: Arc<dyn DnsQuery>,
    resolver_ips: Vec<IpAddr>,
    fallback_ip: IpAddr,
}

impl NameServerResolver {
    /// Creates a resolver that discovers through `resolver_ips` and falls
    /// back to `fallback_ip` for invisible SOA masters.
    pub fn new(dns: Arc<dyn DnsQuery>, resolver_ips: Vec<IpAddr>, fallback_ip: IpAddr) -> Self {
        NameServerResolver {
            dns,
            resolver_ips,
            fallback_ip,
        }
    }

    /// The caller-facing cascade: NS targets first, SOA-derived masters
    /// second, error when both paths come up empty.
    pub async fn server_set(&self, domain: &str) -> Result<Vec<NameServer>, ResolutionError> {
        match self.resolve_all_ns(domain).await {
            Ok(servers) => Ok(servers),
            Err(_) => {
                // Shared-hosting zones often expose no resolvable NS targets;
                // the SOA master is the only server left to ask.
                info!("No NS-derived servers for {domain}, trying the SOA path");
                self.resolve_all_soa(domain).await
            }
        }
    }

    /// Resolves every NS target of `domain` to its A records.
    pub async fn resolve_all_ns(&self, domain: &str) -> Result<Vec<NameServer>, ResolutionError> {
        let Some(response) = self.discovery_query(domain, RecordKind::Ns).await else {
            return Err(ResolutionError {
                domain: domain.to_string(),
            });
        };

        let mut servers = Vec::new();
        for answer in &response.answers {
            let RecordData::Ns(target) = &answer.data else {
                continue;
            };
            for ip in self.address_records(target, None).await {
                servers.push(NameServer {
                    hostname: Some(target.trim_end_matches('.').to_string()),
                    ip,
                });
            }
        }

        finish(domain, servers)
    }

    /// Resolves every SOA answer's primary master (mname) to its A records,
    /// retrying each master once against the public fallback resolver when
    /// the discovery path sees no address for it.
    pub async fn resolve_all_soa(&self, domain: &str) -> Result<Vec<NameServer>, ResolutionError> {
        let Some(response) = self.discovery_query(domain, RecordKind::Soa).await else {
            return Err(ResolutionError {
                domain: domain.to_string(),
            });
        };

        let mut servers = Vec::new();
        for answer in &response.answers {
            let RecordData::Soa { mname } = &answer.data else {
                continue;
            };
            servers.extend(self.resolve_master(mname).await);
        }

        finish(domain, servers)
    }

    /// Resolves only the first SOA answer's primary master, fallback
    /// included.
    pub async fn resolve_authoritative(
        &self,
        domain: &str,
    ) -> Result<Vec<NameServer>, ResolutionError> {
        let Some(response) = self.discovery_query(domain, RecordKind::Soa).await else {
            return Err(ResolutionError {
                domain: domain.to_string(),
            });
        };

        let first_master = response.answers.iter().find_map(|answer| match &answer.data {
            RecordData::Soa { mname } => Some(mname.clone()),
            _ => None,
        });
        let servers = match first_master {
            Some(mname) => self.resolve_master(&mname).await,
            None => Vec::new(),
        };

        finish(domain, servers)
    }

    async fn resolve_master(&self, mname: &str) -> Vec<NameServer> {
        let mut ips = self.address_records(mname, None).await;
        if ips.is_empty() {
            // Hidden-primary setups: the master's glue is only visible to the
            // public resolvers, not through the discovery path.
            debug!("No A record for SOA master {mname}, asking the fallback resolver");
            ips = self.address_records(mname, Some(self.fallback_ip)).await;
        }
        ips.into_iter()
            .map(|ip| NameServer {
                hostname: Some(mname.trim_end_matches('.').to_string()),
                ip,
            })
            .collect()
    }

    /// Tries the configured discovery resolvers in order and returns the
    /// first successful answer. A timeout or non-success code fails that
    /// resolver without re-asking it.
    async fn discovery_query(&self, name: &str, kind: RecordKind) -> Option<DnsResponse> {
        for server in &self.resolver_ips {
            match self.dns.query(name, kind, *server).await {
                Ok(response) if response.code == ResponseCode::NoError => return Some(response),
                Ok(response) => {
                    debug!("{kind} query for {name} against {server} answered {}", response.code);
                }
                Err(e) => {
                    warn!("{kind} query for {name} against {server} failed: {e}");
                }
            }
        }
        None
    }

    async fn address_records(&self, hostname: &str, server: Option<IpAddr>) -> Vec<IpAddr> {
        let response = match server {
            Some(server) => match self.dns.query(hostname, RecordKind::A, server).await {
                Ok(response) if response.code == ResponseCode::NoError => response,
                Ok(_) | Err(_) => return Vec::new(),
            },
            None => match self.discovery_query(hostname, RecordKind::A).await {
                Some(response) => response,
                None => return Vec::new(),
            },
        };

        response
            .answers
            .iter()
            .filter_map(|answer| match &answer.data {
                RecordData::A(ip) => Some(IpAddr::V4(*ip)),
                _ => None,
            })
            .collect()
    }
}

/// Deduplicates by address (several NS names may share one) and enforces the
/// never-empty-on-success invariant.
fn finish(domain: &str, servers: Vec<NameServer>) -> Result<Vec<NameServer>, ResolutionError> {
    let mut seen = HashSet::new();
    let servers: Vec<NameServer> = servers
        .into_iter()
        .filter(|server| seen.insert(server.ip))
        .collect();

    if servers.is_empty() {
        Err(ResolutionError {
            domain: domain.to_string(),
        })
    } else {
        Ok(servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_rejects_empty_sets() {
        assert!(finish("example.test", Vec::new()).is_err());
    }

    #[test]
    fn test_finish_deduplicates_by_address() {
        let servers = vec![
            NameServer {
                hostname: Some("ns1.example.test".into()),
                ip: "10.0.0.1".parse().unwrap(),
            },
            NameServer {
                hostname: Some("ns2.example.test".into()),
                ip: "10.0.0.1".parse().unwrap(),
            },
            NameServer {
                hostname: Some("ns2.example.test".into()),
                ip: "10.0.0.2".parse().unwrap(),
            },
        ];
        let deduped = finish("example.test", servers).unwrap();
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].hostname.as_deref(), Some("ns1.example.test"));
    }

    #[test]
    fn test_name_server_display() {
        let bare = NameServer::from_ip("10.0.0.1".parse().unwrap());
        assert_eq!(bare.to_string(), "10.0.0.1");

        let named = NameServer {
            hostname: Some("ns1.example.test".into()),
            ip: "10.0.0.1".parse().unwrap(),
        };
        assert_eq!(named.to_string(), "10.0.0.1 (ns1.example.test)");
    }
}
