//! Operation log lines shared by the pipeline stages

use std::path::Path;
use std::time::Duration;

/// Announce work starting on `path`
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Report that `items` were `operation` from `path`
///
/// `operation` reads as a past participle, e.g. `"filtered"` gives
/// "Successfully filtered 12 rows from ...".
pub fn log_operation_complete(operation: &str, path: &Path, items: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!("Successfully {operation} {items} items from {} in {duration:?}", path.display()),
        None => log::info!("Successfully {operation} {items} items from {}", path.display()),
    }
}

/// Note an input that was passed over, at debug level
pub fn log_skipped(reason: &str, path: &Path) {
    log::debug!("Skipping {} ({reason})", path.display());
}
