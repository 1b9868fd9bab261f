//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Prints the recoverable-failure counters accumulated during a run.
///
/// Silent when nothing failed.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let total = stats.total_errors();
    if total == 0 {
        return;
    }

    info!("Encountered {} recoverable failures during the run:", total);
    for error_type in ErrorType::iter() {
        let count = stats.get_error_count(error_type);
        if count > 0 {
            info!("  {}: {}", error_type, count);
        }
    }
}
