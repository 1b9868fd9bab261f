//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `subdomain_recon` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use subdomain_recon::initialization::init_logger_with;
use subdomain_recon::zone::ZoneReport;
use subdomain_recon::{run_enumeration, Config, RunError};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_enumeration(config).await {
        Ok(report) => {
            if let Some(zone) = &report.zone {
                print_zone(zone);
            }

            for host in &report.hosts {
                match host.geo.as_ref().and_then(|geo| geo.summary()) {
                    Some(place) => {
                        println!("{} -> {} [{}] ({})", host.name, host.address, host.kind, place)
                    }
                    None => println!("{} -> {} [{}]", host.name, host.address, host.kind),
                }
            }

            println!(
                "✅ Probed {} candidate{} against {} server{}: {} host{} found in {:.1}s",
                report.candidates,
                if report.candidates == 1 { "" } else { "s" },
                report.servers.len(),
                if report.servers.len() == 1 { "" } else { "s" },
                report.hosts.len(),
                if report.hosts.len() == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e @ (RunError::MissingWordlist | RunError::WordlistUnreadable { .. })) => {
            eprintln!("subdomain_recon error: {e}");
            process::exit(2);
        }
        Err(e) => {
            eprintln!("subdomain_recon error: {e}");
            process::exit(1);
        }
    }
}

fn print_zone(zone: &ZoneReport) {
    println!("Zone transfer succeeded ({} records):", zone.len());
    let buckets = [
        ("A", &zone.a),
        ("NS", &zone.ns),
        ("CNAME", &zone.cname),
        ("SOA", &zone.soa),
        ("PTR", &zone.ptr),
        ("MX", &zone.mx),
        ("TXT", &zone.txt),
        ("OTHER", &zone.others),
    ];
    for (label, records) in buckets {
        for record in records.iter() {
            println!("  [{}] {} -> {}", label, record.name, record.value);
        }
    }
}
