//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logs progress information about candidate probing.
///
/// # Arguments
///
/// * `start_time` - The start time of the brute-force run
/// * `attempted` - Atomic counter of probed candidates
pub fn log_progress(start_time: std::time::Instant, attempted: &Arc<AtomicUsize>) {
    let elapsed = start_time.elapsed();
    let probed = attempted.load(Ordering::SeqCst);
    let elapsed_secs = elapsed.as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        probed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Probed {} candidates in {:.2} seconds (~{:.2} queries/sec)",
        probed, elapsed_secs, rate
    );
}
