//! Shared utilities
//!
//! - `logging`: operation logging, table shapes and progress bars
//! - `tokens`: date-token extraction from file names

pub mod logging;
pub mod tokens;

pub use tokens::{extract_date_token, validate_date_token};
