//! Merges Open Payments disclosure archives into one table of the subjects on an
//! author list, with each author's contributed articles attached.

pub mod archive;
pub mod authors;
pub mod combine;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod utils;

// Core types
pub use config::{ArticleNumberSource, PipelineConfig};
pub use error::{DisclosureError, Result};
pub use pipeline::{PipelineSummary, run, run_with_registry};

// Stages
pub use archive::{classify_file_name, extract_archive, find_archives, process_archive};
pub use authors::{AuthorContributions, read_author_table};
pub use combine::{CONTRIBUTED_ARTICLES, join_contributions, output_file_name, write_csv};
pub use filter::AllowList;
pub use loader::{normalize_disclosure, process_csv};
pub use schema::{Category, SchemaRegistry, concat_diagonal, open_payments_registry};

// Arrow types
pub use arrow::record_batch::RecordBatch;
