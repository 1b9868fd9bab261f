//! Found-host accumulation and deduplication.

use std::collections::HashMap;

use serde::Serialize;

use crate::dns::RecordKind;
use crate::geo::GeoPayload;

/// One discovered host: the atomic unit of output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoundHost {
    /// Fully qualified candidate name that answered.
    pub name: String,
    /// Captured value: the address for A answers, the alias target otherwise.
    pub address: String,
    /// Record type of the answer.
    pub kind: RecordKind,
    /// Geolocation payload, when enrichment is enabled and the address is an IP.
    pub geo: Option<GeoPayload>,
    /// Raw whois text, when enrichment is enabled.
    pub whois: Option<String>,
}

impl FoundHost {
    /// Identity key: two findings with the same key are the same host.
    pub fn key(&self) -> HostKey {
        HostKey {
            name: self.name.clone(),
            address: self.address.clone(),
            kind: self.kind,
        }
    }
}

/// Identity of a finding: (name, address, record type).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostKey {
    /// Candidate name.
    pub name: String,
    /// Captured value.
    pub address: String,
    /// Record type.
    pub kind: RecordKind,
}

/// Deduplicating, insertion-ordered collection of findings.
///
/// Workers and server passes append concurrently (under the engine's lock);
/// a duplicate key merges enrichments into the existing entry instead of
/// producing a second finding. Entries accumulate monotonically: nothing is
/// ever removed mid-run.
#[derive(Debug, Default)]
pub struct FoundHostSet {
    hosts: Vec<FoundHost>,
    index: HashMap<HostKey, usize>,
}

impl FoundHostSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        FoundHostSet::default()
    }

    /// Inserts a finding. Returns `true` if it was new, `false` if it merged
    /// into an existing entry (first non-empty enrichment wins).
    pub fn insert(&mut self, host: FoundHost) -> bool {
        let key = host.key();
        if let Some(&position) = self.index.get(&key) {
            let existing = &mut self.hosts[position];
            if existing.geo.is_none() {
                existing.geo = host.geo;
            }
            if existing.whois.is_none() {
                existing.whois = host.whois;
            }
            false
        } else {
            self.index.insert(key, self.hosts.len());
            self.hosts.push(host);
            true
        }
    }

    /// The findings in insertion order.
    pub fn hosts(&self) -> &[FoundHost] {
        &self.hosts
    }

    /// Number of distinct findings.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Whether no findings have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Consumes the set, yielding the findings in insertion order.
    pub fn into_hosts(self) -> Vec<FoundHost> {
        self.hosts
    }
}
