//! Error type definitions.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the geolocation HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Run-level outcomes that propagate to the caller.
///
/// Everything else (refused transfers, per-candidate timeouts, enrichment
/// failures) is absorbed where it happens and reflected only in the shape
/// of the result.
#[derive(Error, Debug)]
pub enum RunError {
    /// The run was started without a wordlist (or with an empty one).
    #[error("no wordlist configured")]
    MissingWordlist,

    /// The configured wordlist file could not be read.
    #[error("wordlist {path} could not be read: {source}")]
    WordlistUnreadable {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Neither NS nor SOA discovery produced a usable server set.
    #[error("no name servers could be resolved for {domain}")]
    NoServers {
        /// Domain whose resolution failed.
        domain: String,
    },

    /// A collaborator could not be constructed.
    #[error("initialization failed: {0}")]
    Initialization(#[from] InitializationError),
}

/// Recoverable failure categories counted during a run.
///
/// These never abort a worker or the run; they are tallied and printed as
/// statistics when the run finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// A candidate query received no response within the timeout.
    QueryTimeout,
    /// A candidate query failed at the transport or protocol level.
    QueryFailure,
    /// A zone transfer was refused or unavailable.
    TransferRefused,
    /// A whois lookup for a finding failed.
    WhoisLookupError,
    /// A geolocation lookup for a resolved address failed.
    GeoLookupError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::QueryTimeout => "DNS query timeout",
            ErrorType::QueryFailure => "DNS query failure",
            ErrorType::TransferRefused => "Zone transfer refused",
            ErrorType::WhoisLookupError => "Whois lookup error",
            ErrorType::GeoLookupError => "Geolocation lookup error",
        }
    }
}
