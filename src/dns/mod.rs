//! DNS query adapter and wire-level types.
//!
//! This module is the boundary between the enumeration logic and the DNS
//! transport:
//! - A closed record-type enum and tagged answer payloads
//! - The [`DnsQuery`] trait: one typed query or one zone transfer against an
//!   explicit server
//! - The production adapter over `hickory-resolver` / `hickory-client`
//!
//! Everything above this module works in terms of [`DnsResponse`] values and
//! never touches resolver internals, so tests can substitute stub adapters.

mod adapter;
mod types;

// Re-export public API
pub use adapter::{DnsQuery, HickoryAdapter};
pub use types::{AnswerRecord, DnsResponse, QueryError, RecordData, RecordKind, ResponseCode};
