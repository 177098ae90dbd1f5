//! Module for reading delimited files into Arrow record batches.
//!
//! Every column is read as `Utf8`; typed interpretation (identifiers, article
//! numbers) happens in the stages that need it. Empty fields decode as null.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::{Reader, ReaderBuilder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::util::safe_open_file;
use crate::error::{DisclosureError, Result};

/// Default number of rows per decoded record batch
pub const DEFAULT_BATCH_SIZE: usize = 8192;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Options for decoding a delimited file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Rows per record batch
    pub batch_size: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Read the header row of a delimited file
pub fn read_header(path: &Path, options: &CsvOptions) -> Result<Vec<String>> {
    let mut file = safe_open_file(path, "reading csv header")?;
    read_header_from(&mut file, options)
}

fn read_header_from(file: &mut File, options: &CsvOptions) -> Result<Vec<String>> {
    let (schema, _) = Format::default()
        .with_header(true)
        .with_delimiter(options.delimiter)
        .infer_schema(&mut *file, Some(0))?;

    Ok(schema
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let name = field.name();
            if idx == 0 {
                name.trim_start_matches(BYTE_ORDER_MARK).to_string()
            } else {
                name.clone()
            }
        })
        .collect())
}

/// Build a nullable all-`Utf8` schema from column names
#[must_use]
pub fn utf8_schema<S: AsRef<str>>(names: &[S]) -> SchemaRef {
    Arc::new(Schema::new(
        names
            .iter()
            .map(|name| Field::new(name.as_ref(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ))
}

/// A streaming reader over a subset of the columns of a delimited file
///
/// Batches carry the requested columns in the requested order.
pub struct CsvTableReader {
    schema: SchemaRef,
    inner: Reader<File>,
}

impl CsvTableReader {
    /// Open `path` and project it onto `columns`
    ///
    /// Fails with [`DisclosureError::MissingColumns`] naming every requested column
    /// that is absent from the header.
    pub fn open<S: AsRef<str>>(path: &Path, columns: &[S], options: &CsvOptions) -> Result<Self> {
        let mut file = safe_open_file(path, "reading csv file")?;
        let header = read_header_from(&mut file, options)?;

        let mut projection = Vec::with_capacity(columns.len());
        let mut missing = Vec::new();
        for column in columns {
            let column = column.as_ref();
            match header.iter().position(|name| name == column) {
                Some(idx) => projection.push(idx),
                None => missing.push(column.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(DisclosureError::MissingColumns {
                path: path.to_path_buf(),
                missing,
            });
        }

        Self::build(path, file, &header, Some(projection), options)
    }

    /// Open `path` reading every column
    pub fn open_all(path: &Path, options: &CsvOptions) -> Result<Self> {
        let mut file = safe_open_file(path, "reading csv file")?;
        let header = read_header_from(&mut file, options)?;
        Self::build(path, file, &header, None, options)
    }

    fn build(
        path: &Path,
        mut file: File,
        header: &[String],
        projection: Option<Vec<usize>>,
        options: &CsvOptions,
    ) -> Result<Self> {
        file.rewind()
            .map_err(|e| DisclosureError::io("Failed to rewind csv file", path, e))?;

        let file_schema = utf8_schema(header);
        let schema = match &projection {
            Some(indices) => Arc::new(file_schema.project(indices)?),
            None => Arc::clone(&file_schema),
        };

        let mut builder = ReaderBuilder::new(file_schema)
            .with_header(true)
            .with_delimiter(options.delimiter)
            .with_batch_size(options.batch_size);
        if let Some(indices) = projection {
            builder = builder.with_projection(indices);
        }

        Ok(Self {
            schema,
            inner: builder.build(file)?,
        })
    }

    /// Schema of the produced batches
    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    /// Read every remaining batch into a single record batch
    pub fn read_to_batch(self) -> Result<RecordBatch> {
        let schema = self.schema();
        let batches = self.collect::<Result<Vec<_>>>()?;
        Ok(concat_batches(&schema, &batches)?)
    }
}

impl Iterator for CsvTableReader {
    type Item = Result<RecordBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|batch| batch.map_err(DisclosureError::from))
    }
}
