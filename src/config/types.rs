//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_GEO_ENDPOINT, DEFAULT_WORKER_COUNT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which discovered name servers a run probes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProbeMode {
    /// Probe only the first discovered server
    #[default]
    FirstServerOnly,
    /// Probe every discovered server in turn
    AllServers,
}

/// Run configuration, doubling as the CLI option surface.
///
/// Can be constructed programmatically via [`Config::default`] and field
/// updates, or parsed from the command line with [`clap::Parser::parse`].
#[derive(Debug, Clone, Parser)]
#[command(
    name = "subdomain_recon",
    about = "Enumerates subdomains via zone transfers and wordlist brute forcing",
    version
)]
pub struct Config {
    /// Target domain to enumerate (e.g. example.com)
    pub domain: String,

    /// Wordlist file with one candidate label per line
    #[arg(short, long)]
    pub wordlist: Option<PathBuf>,

    /// Number of concurrent brute-force workers per server pass
    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    /// Which discovered name servers to probe
    #[arg(long, value_enum, default_value_t = ProbeMode::FirstServerOnly)]
    pub probe_mode: ProbeMode,

    /// Retrieve whois ownership text for each finding
    #[arg(long)]
    pub enable_whois: bool,

    /// Retrieve geolocation data for each resolved address
    #[arg(long)]
    pub enable_geo: bool,

    /// Explicit name server to probe instead of discovering them (repeatable)
    #[arg(long = "name-server", value_name = "IP")]
    pub name_servers: Vec<IpAddr>,

    /// Geolocation JSON endpoint; the IP is appended as a path segment
    #[arg(long, default_value = DEFAULT_GEO_ENDPOINT)]
    pub geo_endpoint: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            wordlist: None,
            workers: DEFAULT_WORKER_COUNT,
            probe_mode: ProbeMode::FirstServerOnly,
            enable_whois: false,
            enable_geo: false,
            name_servers: Vec::new(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
