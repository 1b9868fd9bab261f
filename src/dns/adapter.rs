//! Query transport over `hickory-resolver` and `hickory-client`.
//!
//! Typed queries go through a per-server `TokioAsyncResolver`; zone transfers
//! open a dedicated TCP client, since AXFR is not a resolver operation.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hickory_client::client::{AsyncClient, ClientHandle};
use hickory_client::proto::iocompat::AsyncIoTokioAsStd;
use hickory_client::rr::{DNSClass, Name, RecordType};
use hickory_client::tcp::TcpClientStream;
use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use tokio::net::TcpStream;

use super::types::{AnswerRecord, DnsResponse, QueryError, RecordKind};

/// A single query or zone transfer against an explicit server.
///
/// This is the seam between the enumeration logic and the network; tests
/// substitute canned-response implementations.
#[async_trait]
pub trait DnsQuery: Send + Sync {
    /// Issues one typed query for `name` against `server`.
    ///
    /// A non-success response code is a successful call carrying that code;
    /// only timeouts and transport failures surface as [`QueryError`].
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
        server: IpAddr,
    ) -> Result<DnsResponse, QueryError>;

    /// Requests a full zone transfer (AXFR) for `domain` from `server`.
    async fn zone_transfer(&self, domain: &str, server: IpAddr)
        -> Result<DnsResponse, QueryError>;
}

/// Production adapter over the hickory stack.
///
/// One resolver configuration is built per target server and cached for the
/// lifetime of the adapter, so concurrent lookups against different servers
/// never share mutable resolver state.
pub struct HickoryAdapter {
    timeout: Duration,
    resolvers: Mutex<HashMap<IpAddr, Arc<TokioAsyncResolver>>>,
}

impl HickoryAdapter {
    /// Creates an adapter with the given per-query timeout.
    pub fn new(timeout: Duration) -> Self {
        HickoryAdapter {
            timeout,
            resolvers: Mutex::new(HashMap::new()),
        }
    }

    fn resolver_for(&self, server: IpAddr) -> Arc<TokioAsyncResolver> {
        let mut cache = self.resolvers.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(resolver) = cache.get(&server) {
            return Arc::clone(resolver);
        }

        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(
            SocketAddr::new(server, 53),
            Protocol::Udp,
        ));

        let mut opts = ResolverOpts::default();
        opts.timeout = self.timeout;
        // The caller decides whether to fall back to another server; the
        // transport itself never re-asks.
        opts.attempts = 1;
        // Candidate names are already fully qualified; never append search
        // domains from the host configuration.
        opts.ndots = 0;
        opts.use_hosts_file = false;

        let resolver = Arc::new(TokioAsyncResolver::tokio(config, opts));
        cache.insert(server, Arc::clone(&resolver));
        resolver
    }
}

#[async_trait]
impl DnsQuery for HickoryAdapter {
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
        server: IpAddr,
    ) -> Result<DnsResponse, QueryError> {
        let resolver = self.resolver_for(server);
        match resolver.lookup(name, kind.to_record_type()).await {
            Ok(lookup) => Ok(DnsResponse::answered(
                lookup.record_iter().map(AnswerRecord::from_record).collect(),
            )),
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                    Ok(DnsResponse::empty((*response_code).into()))
                }
                ResolveErrorKind::Timeout => Err(QueryError::Timeout { server }),
                _ => Err(QueryError::Protocol(e.to_string())),
            },
        }
    }

    async fn zone_transfer(
        &self,
        domain: &str,
        server: IpAddr,
    ) -> Result<DnsResponse, QueryError> {
        let name =
            Name::from_utf8(domain).map_err(|e| QueryError::Protocol(e.to_string()))?;
        let addr = SocketAddr::new(server, 53);

        let (stream, sender) = TcpClientStream::<AsyncIoTokioAsStd<TcpStream>>::new(addr);
        let (mut client, background) =
            tokio::time::timeout(self.timeout, AsyncClient::new(stream, sender, None))
                .await
                .map_err(|_| QueryError::Timeout { server })?
                .map_err(|e| QueryError::Protocol(e.to_string()))?;
        let background = tokio::spawn(background);

        let result = tokio::time::timeout(
            self.timeout,
            client.query(name, DNSClass::IN, RecordType::AXFR),
        )
        .await;
        background.abort();

        match result {
            Err(_) => Err(QueryError::Timeout { server }),
            Ok(Err(e)) => Err(QueryError::Protocol(e.to_string())),
            Ok(Ok(response)) => {
                let code = response.response_code().into();
                let answers = response
                    .answers()
                    .iter()
                    .map(AnswerRecord::from_record)
                    .collect();
                Ok(DnsResponse { code, answers })
            }
        }
    }
}
