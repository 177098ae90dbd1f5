//! Configuration for the disclosure pipeline.

use std::path::{Path, PathBuf};

use crate::reader::{CsvOptions, DEFAULT_BATCH_SIZE};
use crate::schema::PROFILE_ID;

/// Default directory holding the disclosure archives
pub const DEFAULT_DATA_DIR: &str = "data";
/// Default directory the combined file is written to
pub const DEFAULT_RESULTS_DIR: &str = "results";
/// Default author reference file
pub const DEFAULT_AUTHOR_FILE: &str = "authors/AuthorID_20240628.csv";
/// Default identifier column of the author reference file
pub const DEFAULT_AUTHOR_ID_COLUMN: &str = "Author_ID";
/// Prefix of the wide-format article slot columns
pub const DEFAULT_ARTICLE_PREFIX: &str = "ArticleID_";
/// Archive extension, matched case-sensitively
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "ZIP";

/// Where the article number of a slot comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleNumberSource {
    /// The integer value stored in the slot's cell
    #[default]
    CellValue,
    /// The numeric suffix of the slot column name (`ArticleID_3` gives 3)
    SlotSuffix,
}

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned for disclosure archives
    pub data_dir: PathBuf,
    /// Directory the combined output is written to
    pub results_dir: PathBuf,
    /// Author reference file (delimited text or spreadsheet)
    pub author_file: PathBuf,
    /// Delimiter of a delimited author file
    pub author_delimiter: u8,
    /// Identifier column of the author file
    pub author_id_column: String,
    /// Prefix of the article slot columns in the author file
    pub article_prefix: String,
    /// Where article numbers are taken from
    pub article_number_source: ArticleNumberSource,
    /// Sort each contributor's article list numerically before output
    pub sort_contributions: bool,
    /// Canonical identifier column of the combined disclosure table
    pub disclosure_id_column: String,
    /// Archive extension, matched case-sensitively
    pub archive_extension: String,
    /// Where archives are extracted; the system temporary directory when unset
    pub scratch_dir: Option<PathBuf>,
    /// Rows per decoded record batch
    pub batch_size: usize,
    /// Show a progress bar over the archives
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            author_file: PathBuf::from(DEFAULT_AUTHOR_FILE),
            author_delimiter: b';',
            author_id_column: DEFAULT_AUTHOR_ID_COLUMN.to_string(),
            article_prefix: DEFAULT_ARTICLE_PREFIX.to_string(),
            article_number_source: ArticleNumberSource::default(),
            sort_contributions: false,
            disclosure_id_column: PROFILE_ID.to_string(),
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            scratch_dir: None,
            batch_size: DEFAULT_BATCH_SIZE,
            show_progress: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn with_results_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.results_dir = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn with_author_file(mut self, path: impl AsRef<Path>) -> Self {
        self.author_file = path.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn with_author_id_column(mut self, column: impl Into<String>) -> Self {
        self.author_id_column = column.into();
        self
    }

    #[must_use]
    pub fn with_author_delimiter(mut self, delimiter: u8) -> Self {
        self.author_delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_article_number_source(mut self, source: ArticleNumberSource) -> Self {
        self.article_number_source = source;
        self
    }

    #[must_use]
    pub fn with_sorted_contributions(mut self, sort: bool) -> Self {
        self.sort_contributions = sort;
        self
    }

    #[must_use]
    pub fn with_scratch_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.scratch_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Options for decoding the comma-delimited disclosure files
    #[must_use]
    pub fn disclosure_csv_options(&self) -> CsvOptions {
        CsvOptions::default().with_batch_size(self.batch_size)
    }

    /// Options for decoding a delimited author file
    #[must_use]
    pub fn author_csv_options(&self) -> CsvOptions {
        CsvOptions::default()
            .with_delimiter(self.author_delimiter)
            .with_batch_size(self.batch_size)
    }
}
