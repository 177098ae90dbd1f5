//! Error handling for the disclosure pipeline.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use thiserror::Error;

/// Specialized error type for disclosure processing
#[derive(Debug, Error)]
pub enum DisclosureError {
    /// Error opening, reading or writing a file
    #[error("IO error: {context} ({}): {source}", .path.display())]
    Io {
        context: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path exists but is not usable for the requested purpose
    #[error("Invalid path {}: {message}", .path.display())]
    InvalidPath { path: PathBuf, message: String },

    /// Error decoding, encoding or transforming Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading a compressed archive
    #[error("Archive error in {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Error reading a spreadsheet
    #[error("Spreadsheet error in {}: {message}", .path.display())]
    Spreadsheet { path: PathBuf, message: String },

    /// One or more expected columns are absent from a file
    #[error("Schema error: {} is missing columns [{}]", .path.display(), .missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    /// Schemas or columns that cannot be reconciled
    #[error("Schema error: {0}")]
    Schema(String),

    /// No archive produced a usable table
    #[error("No disclosure tables were produced; nothing to combine")]
    NoTables,

    /// The author file name carries no 8-digit date token
    #[error("No 8-digit date token found in file name '{0}'")]
    MissingDateToken(String),

    /// A cell value could not be parsed into the expected type
    #[error("Cannot parse '{value}' in column '{column}' as {expected}")]
    Parse {
        column: String,
        value: String,
        expected: &'static str,
    },
}

impl DisclosureError {
    /// Build an IO error carrying the path and what the path was needed for
    pub fn io(context: impl Into<String>, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            path: path.into(),
            source,
        }
    }

    /// Build a parse error for a cell value
    pub fn parse(column: &str, value: &str, expected: &'static str) -> Self {
        Self::Parse {
            column: column.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

/// Result type for disclosure operations
pub type Result<T> = std::result::Result<T, DisclosureError>;
