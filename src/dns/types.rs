//! DNS answer types.
//!
//! Answers are modeled as a closed tagged enum over the record types the
//! enumeration cares about; everything else lands in [`RecordData::Other`]
//! with its payload preserved as text rather than being dropped.

use std::net::Ipv4Addr;

use hickory_resolver::proto::rr::{RData, Record, RecordType};
use serde::Serialize;
use strum_macros::Display as DisplayMacro;
use thiserror::Error;

/// Errors from a single query or zone transfer.
///
/// Both variants are expected under normal operation and absorbed per
/// candidate; neither aborts a worker or the run.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The server did not answer within the configured timeout.
    #[error("query to {server} timed out")]
    Timeout {
        /// Server that failed to answer.
        server: std::net::IpAddr,
    },

    /// The query failed at the transport or protocol level.
    #[error("dns protocol error: {0}")]
    Protocol(String),
}

/// DNS response codes relevant to enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    /// Query answered successfully.
    NoError,
    /// The queried name does not exist.
    NxDomain,
    /// The server refused to answer (typical for zone transfers).
    Refused,
    /// The server failed to process the query.
    ServFail,
    /// The server is not authoritative for the zone.
    NotAuth,
    /// Any other code, carried numerically.
    Other(u16),
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseCode::NoError => f.write_str("NOERROR"),
            ResponseCode::NxDomain => f.write_str("NXDOMAIN"),
            ResponseCode::Refused => f.write_str("REFUSED"),
            ResponseCode::ServFail => f.write_str("SERVFAIL"),
            ResponseCode::NotAuth => f.write_str("NOTAUTH"),
            ResponseCode::Other(code) => write!(f, "RCODE({code})"),
        }
    }
}

impl From<hickory_resolver::proto::op::ResponseCode> for ResponseCode {
    fn from(code: hickory_resolver::proto::op::ResponseCode) -> Self {
        use hickory_resolver::proto::op::ResponseCode as Rc;
        match code {
            Rc::NoError => ResponseCode::NoError,
            Rc::NXDomain => ResponseCode::NxDomain,
            Rc::Refused => ResponseCode::Refused,
            Rc::ServFail => ResponseCode::ServFail,
            Rc::NotAuth => ResponseCode::NotAuth,
            other => ResponseCode::Other(u16::from(other)),
        }
    }
}

/// Closed set of record types the enumeration classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, DisplayMacro)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecordKind {
    /// IPv4 address record
    A,
    /// Name server record
    Ns,
    /// Canonical name (alias) record
    Cname,
    /// Start of authority record
    Soa,
    /// Pointer (reverse) record
    Ptr,
    /// Mail exchanger record
    Mx,
    /// Text record
    Txt,
    /// Anything else, preserved rather than dropped
    Other,
}

impl RecordKind {
    pub(crate) fn to_record_type(self) -> RecordType {
        match self {
            RecordKind::A => RecordType::A,
            RecordKind::Ns => RecordType::NS,
            RecordKind::Cname => RecordType::CNAME,
            RecordKind::Soa => RecordType::SOA,
            RecordKind::Ptr => RecordType::PTR,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Txt => RecordType::TXT,
            RecordKind::Other => RecordType::ANY,
        }
    }
}

/// Type-specific payload of one answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// IPv4 address
    A(Ipv4Addr),
    /// Name server target
    Ns(String),
    /// Alias target
    Cname(String),
    /// Start of authority; only the primary master name matters here
    Soa {
        /// Primary master server name (mname).
        mname: String,
    },
    /// Reverse pointer target
    Ptr(String),
    /// Mail exchanger
    Mx {
        /// Exchange preference (lower wins).
        preference: u16,
        /// Exchange host name.
        exchange: String,
    },
    /// Joined text payload
    Txt(String),
    /// Unrecognized type, payload preserved as text
    Other {
        /// Wire type name (e.g. "AAAA").
        rtype: String,
        /// Textual payload.
        value: String,
    },
}

impl RecordData {
    /// The [`RecordKind`] bucket this payload belongs to.
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordData::A(_) => RecordKind::A,
            RecordData::Ns(_) => RecordKind::Ns,
            RecordData::Cname(_) => RecordKind::Cname,
            RecordData::Soa { .. } => RecordKind::Soa,
            RecordData::Ptr(_) => RecordKind::Ptr,
            RecordData::Mx { .. } => RecordKind::Mx,
            RecordData::Txt(_) => RecordKind::Txt,
            RecordData::Other { .. } => RecordKind::Other,
        }
    }

    /// The captured value of this payload as text: the address for A, the
    /// target for NS/CNAME/PTR/MX, the mname for SOA, the text for TXT.
    pub fn value(&self) -> String {
        match self {
            RecordData::A(ip) => ip.to_string(),
            RecordData::Ns(target)
            | RecordData::Cname(target)
            | RecordData::Ptr(target)
            | RecordData::Txt(target) => target.clone(),
            RecordData::Soa { mname } => mname.clone(),
            RecordData::Mx { exchange, .. } => exchange.clone(),
            RecordData::Other { value, .. } => value.clone(),
        }
    }
}

/// One answer record: owner name plus typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Owner name of the record.
    pub name: String,
    /// Typed payload.
    pub data: RecordData,
}

impl AnswerRecord {
    /// Creates an answer record.
    pub fn new(name: impl Into<String>, data: RecordData) -> Self {
        AnswerRecord {
            name: name.into(),
            data,
        }
    }

    /// The record's classification bucket.
    pub fn kind(&self) -> RecordKind {
        self.data.kind()
    }

    pub(crate) fn from_record(record: &Record) -> Self {
        let name = record.name().to_utf8();
        let data = match record.data() {
            Some(RData::A(a)) => RecordData::A(a.0),
            Some(RData::NS(ns)) => RecordData::Ns(ns.to_utf8()),
            Some(RData::CNAME(cname)) => RecordData::Cname(cname.to_utf8()),
            Some(RData::SOA(soa)) => RecordData::Soa {
                mname: soa.mname().to_utf8(),
            },
            Some(RData::PTR(ptr)) => RecordData::Ptr(ptr.to_utf8()),
            Some(RData::MX(mx)) => RecordData::Mx {
                preference: mx.preference(),
                exchange: mx.exchange().to_utf8(),
            },
            Some(RData::TXT(txt)) => RecordData::Txt(
                txt.iter()
                    .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                    .collect::<Vec<String>>()
                    .join(""),
            ),
            Some(other) => RecordData::Other {
                rtype: record.record_type().to_string(),
                value: other.to_string(),
            },
            None => RecordData::Other {
                rtype: record.record_type().to_string(),
                value: String::new(),
            },
        };
        AnswerRecord { name, data }
    }
}

/// A decoded response: response code plus answer records.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    /// Response code of the answer.
    pub code: ResponseCode,
    /// Answer section records.
    pub answers: Vec<AnswerRecord>,
}

impl DnsResponse {
    /// A NOERROR response carrying the given answers.
    pub fn answered(answers: Vec<AnswerRecord>) -> Self {
        DnsResponse {
            code: ResponseCode::NoError,
            answers,
        }
    }

    /// An empty response with the given code.
    pub fn empty(code: ResponseCode) -> Self {
        DnsResponse {
            code,
            answers: Vec::new(),
        }
    }
}
