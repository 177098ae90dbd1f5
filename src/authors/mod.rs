//! Author reference file
//!
//! The author file is wide: one identifier column plus a run of article slot
//! columns (`ArticleID_1`, `ArticleID_2`, ...), each holding one article number
//! or nothing. This module loads it and reshapes it into one article list per
//! identifier, and derives the allow-list used to filter the disclosures.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::record_batch::RecordBatch;
use calamine::{Data, Reader, open_workbook_auto};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::config::{ArticleNumberSource, PipelineConfig};
use crate::error::{DisclosureError, Result};
use crate::filter::{AllowList, parse_identifier};
use crate::reader::{CsvTableReader, utf8_schema};
use crate::utils::logging::log_shape;

/// Article numbers credited to one author, in slot order
pub type ArticleList = SmallVec<[i64; 8]>;

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether `path` is read as a spreadsheet rather than as delimited text
#[must_use]
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Load the author file as an all-`Utf8` record batch
///
/// Spreadsheets are read from their first worksheet with the first row as the
/// header. Anything else is read as delimited text with the configured
/// delimiter.
pub fn read_author_table(path: &Path, config: &PipelineConfig) -> Result<RecordBatch> {
    let batch = if is_spreadsheet(path) {
        read_spreadsheet(path)?
    } else {
        CsvTableReader::open_all(path, &config.author_csv_options())?.read_to_batch()?
    };
    log_shape(&path.display().to_string(), &batch);
    Ok(batch)
}

fn spreadsheet_error(path: &Path, message: impl Into<String>) -> DisclosureError {
    DisclosureError::Spreadsheet {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn read_spreadsheet(path: &Path) -> Result<RecordBatch> {
    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(path, e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_error(path, "workbook has no worksheets"))?
        .map_err(|e| spreadsheet_error(path, e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| spreadsheet_error(path, "first worksheet is empty"))?
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];
    for row in rows {
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(row.get(idx).and_then(cell_text));
        }
    }

    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|values| Arc::new(StringArray::from(values)) as ArrayRef)
        .collect();
    Ok(RecordBatch::try_new(utf8_schema(&header), arrays)?)
}

/// Text of a spreadsheet cell; whole-number floats lose their `.0`
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Some((*f as i64).to_string()),
        other => Some(other.to_string()),
    }
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str, path: &Path) -> Result<&'a StringArray> {
    let array = batch.column_by_name(name).ok_or_else(|| DisclosureError::MissingColumns {
        path: path.to_path_buf(),
        missing: vec![name.to_string()],
    })?;
    array
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| DisclosureError::Schema(format!("Column '{name}' of the author file is not text")))
}

/// Per-author article lists and the allow-list of author identifiers
#[derive(Debug, Clone, Default)]
pub struct AuthorContributions {
    allow_list: AllowList,
    articles: FxHashMap<i64, ArticleList>,
}

impl AuthorContributions {
    /// Load and group the configured author file
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let table = read_author_table(&config.author_file, config)?;
        Self::from_batch(&table, &config.author_file, config)
    }

    /// Group a wide author table
    ///
    /// Slot columns are visited in header order and, within a slot, rows in
    /// file order. Empty slots are skipped. Rows without an identifier
    /// contribute nothing. An identifier or article value that is not an
    /// integer is an error.
    pub fn from_batch(batch: &RecordBatch, path: &Path, config: &PipelineConfig) -> Result<Self> {
        let id_column = config.author_id_column.as_str();
        let ids = string_column(batch, id_column, path)?;

        let parsed_ids: Vec<Option<i64>> = ids
            .iter()
            .map(|value| {
                value
                    .map(|raw| {
                        parse_identifier(raw).ok_or_else(|| DisclosureError::parse(id_column, raw, "an integer identifier"))
                    })
                    .transpose()
            })
            .collect::<Result<_>>()?;
        let allow_list: AllowList = parsed_ids.iter().flatten().copied().collect();

        let schema = batch.schema();
        let slots: Vec<&str> = schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .filter(|name| name.starts_with(config.article_prefix.as_str()))
            .collect();
        if slots.is_empty() {
            log::warn!(
                "No '{}' columns in {}; no contributions will be attached",
                config.article_prefix,
                path.display()
            );
        }

        let mut articles: FxHashMap<i64, ArticleList> = FxHashMap::default();
        for slot in &slots {
            let values = string_column(batch, slot, path)?;
            let suffix = match config.article_number_source {
                ArticleNumberSource::SlotSuffix => Some(slot_number(slot, &config.article_prefix)?),
                ArticleNumberSource::CellValue => None,
            };

            for (id, value) in parsed_ids.iter().zip(values.iter()) {
                let (Some(id), Some(raw)) = (id, value) else {
                    continue;
                };
                let number = match suffix {
                    Some(number) => number,
                    None => parse_identifier(raw).ok_or_else(|| DisclosureError::parse(slot, raw, "an integer article number"))?,
                };
                articles.entry(*id).or_default().push(number);
            }
        }

        if config.sort_contributions {
            for list in articles.values_mut() {
                list.sort_unstable();
            }
        }

        log::info!(
            "Loaded {} author identifiers ({} distinct), {} with contributions across {} article slots",
            allow_list.len(),
            allow_list.distinct_len(),
            articles.len(),
            slots.len()
        );

        Ok(Self { allow_list, articles })
    }

    /// Identifiers of every author row, in file order
    #[must_use]
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Article list of `id`, if the author has any
    #[must_use]
    pub fn articles(&self, id: i64) -> Option<&[i64]> {
        self.articles.get(&id).map(|list| list.as_slice())
    }

    /// Article list of `id` rendered as `"a, b, c"`
    #[must_use]
    pub fn rendered(&self, id: i64) -> Option<String> {
        self.articles(id).map(|list| list.iter().join(", "))
    }

    /// Number of authors with at least one article
    #[must_use]
    pub fn contributor_count(&self) -> usize {
        self.articles.len()
    }
}

fn slot_number(slot: &str, prefix: &str) -> Result<i64> {
    slot.strip_prefix(prefix)
        .and_then(|suffix| suffix.parse().ok())
        .ok_or_else(|| DisclosureError::parse(slot, slot, "an article slot with a numeric suffix"))
}
