//! Shared test helpers: stub collaborators and record constructors.
//!
//! The stubs count their calls so tests can assert which network operations
//! a run actually performed.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use subdomain_recon::dns::{
    AnswerRecord, DnsQuery, DnsResponse, QueryError, RecordData, RecordKind, ResponseCode,
};
use subdomain_recon::geo::{GeoLookup, GeoPayload};
use subdomain_recon::whois::WhoisLookup;

type QueryKey = (String, RecordKind, IpAddr);
type TransferKey = (String, IpAddr);

/// Canned-response DNS adapter.
///
/// Unconfigured queries answer NXDOMAIN; unconfigured transfers answer
/// REFUSED. Names are normalized without their trailing dot, so responses
/// configured as "ns1.example.test" match queries for "ns1.example.test.".
#[derive(Default)]
pub struct StubDns {
    answers: Mutex<HashMap<QueryKey, DnsResponse>>,
    timeouts: Mutex<HashSet<QueryKey>>,
    transfers: Mutex<HashMap<TransferKey, DnsResponse>>,
    query_count: AtomicUsize,
    a_query_count: AtomicUsize,
    transfer_count: AtomicUsize,
}

#[allow(dead_code)] // Each integration test exercises a different subset
impl StubDns {
    pub fn new() -> Self {
        StubDns::default()
    }

    pub fn answer(&self, name: &str, kind: RecordKind, server: &str, response: DnsResponse) {
        self.answers
            .lock()
            .unwrap()
            .insert(key(name, kind, server), response);
    }

    pub fn timeout(&self, name: &str, kind: RecordKind, server: &str) {
        self.timeouts.lock().unwrap().insert(key(name, kind, server));
    }

    pub fn transfer(&self, domain: &str, server: &str, response: DnsResponse) {
        self.transfers
            .lock()
            .unwrap()
            .insert((trim(domain), addr(server)), response);
    }

    pub fn queries(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    pub fn a_queries(&self) -> usize {
        self.a_query_count.load(Ordering::SeqCst)
    }

    pub fn transfers_attempted(&self) -> usize {
        self.transfer_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsQuery for StubDns {
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
        server: IpAddr,
    ) -> Result<DnsResponse, QueryError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        if kind == RecordKind::A {
            self.a_query_count.fetch_add(1, Ordering::SeqCst);
        }

        let key = (trim(name), kind, server);
        if self.timeouts.lock().unwrap().contains(&key) {
            return Err(QueryError::Timeout { server });
        }
        Ok(self
            .answers
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| DnsResponse::empty(ResponseCode::NxDomain)))
    }

    async fn zone_transfer(
        &self,
        domain: &str,
        server: IpAddr,
    ) -> Result<DnsResponse, QueryError> {
        self.transfer_count.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .transfers
            .lock()
            .unwrap()
            .get(&(trim(domain), server))
            .cloned()
            .unwrap_or_else(|| DnsResponse::empty(ResponseCode::Refused)))
    }
}

/// Whois stub returning a fixed text, counting calls.
#[derive(Default)]
#[allow(dead_code)] // Each integration test exercises a different subset
pub struct CountingWhois {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingWhois {
    pub fn new() -> Self {
        CountingWhois::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WhoisLookup for CountingWhois {
    async fn lookup(&self, host: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("domain: {host}\nOrgName: Example Org"))
    }
}

/// Geolocation stub returning a fixed payload, counting calls. Can be
/// configured to fail every lookup.
#[derive(Default)]
#[allow(dead_code)] // Each integration test exercises a different subset
pub struct CountingGeo {
    calls: AtomicUsize,
    fail: bool,
}

#[allow(dead_code)]
impl CountingGeo {
    pub fn new() -> Self {
        CountingGeo::default()
    }

    pub fn failing() -> Self {
        CountingGeo {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoLookup for CountingGeo {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("geolocation service unreachable"));
        }
        Ok(GeoPayload {
            ip: Some(ip.to_string()),
            country_code: Some("US".into()),
            city: Some("Mountain View".into()),
            ..Default::default()
        })
    }
}

#[allow(dead_code)]
pub fn a_record(name: &str, ip: &str) -> AnswerRecord {
    AnswerRecord::new(name, RecordData::A(ip.parse().expect("ipv4 literal")))
}

#[allow(dead_code)]
pub fn ns_record(zone: &str, target: &str) -> AnswerRecord {
    AnswerRecord::new(zone, RecordData::Ns(target.to_string()))
}

#[allow(dead_code)]
pub fn soa_record(zone: &str, mname: &str) -> AnswerRecord {
    AnswerRecord::new(
        zone,
        RecordData::Soa {
            mname: mname.to_string(),
        },
    )
}

#[allow(dead_code)]
pub fn cname_record(name: &str, target: &str) -> AnswerRecord {
    AnswerRecord::new(name, RecordData::Cname(target.to_string()))
}

#[allow(dead_code)]
pub fn mx_record(zone: &str, preference: u16, exchange: &str) -> AnswerRecord {
    AnswerRecord::new(
        zone,
        RecordData::Mx {
            preference,
            exchange: exchange.to_string(),
        },
    )
}

#[allow(dead_code)]
pub fn txt_record(zone: &str, text: &str) -> AnswerRecord {
    AnswerRecord::new(zone, RecordData::Txt(text.to_string()))
}

#[allow(dead_code)]
pub fn other_record(zone: &str, rtype: &str, value: &str) -> AnswerRecord {
    AnswerRecord::new(
        zone,
        RecordData::Other {
            rtype: rtype.to_string(),
            value: value.to_string(),
        },
    )
}

/// Writes a temporary wordlist file, one label per line.
#[allow(dead_code)]
pub fn write_wordlist(labels: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp wordlist");
    for label in labels {
        writeln!(file, "{label}").expect("write label");
    }
    file
}

fn key(name: &str, kind: RecordKind, server: &str) -> QueryKey {
    (trim(name), kind, addr(server))
}

fn trim(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

fn addr(server: &str) -> IpAddr {
    server.parse().expect("ip literal")
}
