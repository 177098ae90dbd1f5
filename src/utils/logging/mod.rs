//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for logging, table shape output, and progress tracking.

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::console::{log_schema_info, log_shape, shape};
pub use self::log::{log_operation_complete, log_operation_start, log_skipped};
pub use self::progress::{create_main_progress_bar, finish_progress_bar};
