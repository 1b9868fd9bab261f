//! Zone transfer probing and record classification.
//!
//! A transfer is the cheap path: one request can hand over the whole zone.
//! Most production deployments refuse it, so refusal is an expected outcome
//! that routes the run into brute forcing rather than an error.

use std::net::IpAddr;

use log::debug;
use thiserror::Error;

use crate::dns::{AnswerRecord, DnsQuery, RecordKind, ResponseCode};

/// One classified record from a transferred zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    /// Owner name of the record.
    pub name: String,
    /// Classification bucket.
    pub kind: RecordKind,
    /// Captured value (address, target name, text, ...).
    pub value: String,
}

/// A transferred zone, bucketed by record type.
///
/// Unrecognized types land in `others`; nothing is dropped.
#[derive(Debug, Clone, Default)]
pub struct ZoneReport {
    /// Address records.
    pub a: Vec<ZoneRecord>,
    /// Name server records.
    pub ns: Vec<ZoneRecord>,
    /// Alias records.
    pub cname: Vec<ZoneRecord>,
    /// Start-of-authority records.
    pub soa: Vec<ZoneRecord>,
    /// Pointer records.
    pub ptr: Vec<ZoneRecord>,
    /// Mail exchanger records.
    pub mx: Vec<ZoneRecord>,
    /// Text records.
    pub txt: Vec<ZoneRecord>,
    /// Everything else.
    pub others: Vec<ZoneRecord>,
}

impl ZoneReport {
    /// Buckets a transfer's answer records by type.
    pub fn classify(answers: &[AnswerRecord]) -> Self {
        let mut report = ZoneReport::default();
        for answer in answers {
            let record = ZoneRecord {
                name: answer.name.clone(),
                kind: answer.kind(),
                value: answer.data.value(),
            };
            match record.kind {
                RecordKind::A => report.a.push(record),
                RecordKind::Ns => report.ns.push(record),
                RecordKind::Cname => report.cname.push(record),
                RecordKind::Soa => report.soa.push(record),
                RecordKind::Ptr => report.ptr.push(record),
                RecordKind::Mx => report.mx.push(record),
                RecordKind::Txt => report.txt.push(record),
                RecordKind::Other => report.others.push(record),
            }
        }
        report
    }

    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.a.len()
            + self.ns.len()
            + self.cname.len()
            + self.soa.len()
            + self.ptr.len()
            + self.mx.len()
            + self.txt.len()
            + self.others.len()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Folds another report's buckets into this one (all-servers mode, where
    /// more than one server may allow the transfer).
    pub fn merge(&mut self, other: ZoneReport) {
        self.a.extend(other.a);
        self.ns.extend(other.ns);
        self.cname.extend(other.cname);
        self.soa.extend(other.soa);
        self.ptr.extend(other.ptr);
        self.mx.extend(other.mx);
        self.txt.extend(other.txt);
        self.others.extend(other.others);
    }
}

/// The server declined or could not complete the transfer.
///
/// Expected and non-fatal: the caller proceeds to brute force.
#[derive(Error, Debug)]
#[error("zone transfer of {domain} refused by {server}: {reason}")]
pub struct TransferRefused {
    /// Zone that was requested.
    pub domain: String,
    /// Server that declined.
    pub server: IpAddr,
    /// Response code or transport error, as text.
    pub reason: String,
}

/// Attempts a full zone transfer of `domain` from `server`.
pub async fn try_zone_transfer(
    dns: &dyn DnsQuery,
    domain: &str,
    server: IpAddr,
) -> Result<ZoneReport, TransferRefused> {
    debug!("Attempting zone transfer of {domain} from {server}");
    match dns.zone_transfer(domain, server).await {
        Ok(response) if response.code == ResponseCode::NoError => {
            Ok(ZoneReport::classify(&response.answers))
        }
        Ok(response) => Err(TransferRefused {
            domain: domain.to_string(),
            server,
            reason: response.code.to_string(),
        }),
        Err(e) => Err(TransferRefused {
            domain: domain.to_string(),
            server,
            reason: e.to_string(),
        }),
    }
}
