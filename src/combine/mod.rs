//! Joining author contributions onto the combined table and writing the result

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::authors::AuthorContributions;
use crate::error::{DisclosureError, Result};
use crate::filter::identifier_array;
use crate::utils::{extract_date_token, validate_date_token};

/// Column holding each row's rendered article list
pub const CONTRIBUTED_ARTICLES: &str = "Contributed_Articles";

/// Left join the author contributions onto `combined` by identifier
///
/// Every row of `combined` is kept in order. Rows whose identifier has no
/// article list, or no identifier at all, get an empty string.
pub fn join_contributions(
    combined: &RecordBatch,
    contributions: &AuthorContributions,
    id_column: &str,
) -> Result<RecordBatch> {
    let ids = combined
        .column_by_name(id_column)
        .ok_or_else(|| DisclosureError::Schema(format!("Combined table has no '{id_column}' column to join on")))?;
    let ids = identifier_array(ids, id_column)?;

    let mut matched = 0usize;
    let rendered: StringArray = ids
        .iter()
        .map(|id| {
            let text = id.and_then(|id| contributions.rendered(id));
            if text.is_some() {
                matched += 1;
            }
            Some(text.unwrap_or_default())
        })
        .collect();
    log::info!("Attached contributions to {matched} of {} rows", combined.num_rows());

    let schema = combined.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| (**f).clone()).collect();
    fields.push(Field::new(CONTRIBUTED_ARTICLES, DataType::Utf8, false));

    let mut columns = combined.columns().to_vec();
    columns.push(Arc::new(rendered) as ArrayRef);

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Output file name `FINAL_<YYYYMMDD>.csv` derived from the author file name
///
/// The token is the first run of eight digits in the file name; digits in
/// parent directory names are ignored. A token that is not a real calendar
/// date is still used, with a warning.
pub fn output_file_name(author_file: &Path) -> Result<String> {
    let name = author_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let token = extract_date_token(&name).ok_or_else(|| DisclosureError::MissingDateToken(name.clone()))?;
    if !validate_date_token(token) {
        log::warn!("Date token {token} in '{name}' is not a calendar date; using it anyway");
    }
    Ok(format!("FINAL_{token}.csv"))
}

/// Full output path inside `results_dir`
pub fn output_path(results_dir: &Path, author_file: &Path) -> Result<PathBuf> {
    Ok(results_dir.join(output_file_name(author_file)?))
}

/// Write `batch` as comma-delimited text with a header row
pub fn write_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).map_err(|e| DisclosureError::io("Failed to create output file", path, e))?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    Ok(())
}
