//! Filtering of disclosure tables by subject identifier
//!
//! - `core`: mask filtering, row reordering and the `BatchFilter` trait
//! - `identifier`: allow-list membership by integer identifier value

pub mod core;
pub mod identifier;

pub use self::core::{BatchFilter, filter_record_batch, take_rows};
pub use self::identifier::{AllowList, IdentifierFilter, identifier_array, parse_identifier, sort_by_identifier};
