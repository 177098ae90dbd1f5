//! Disclosure file loading
//!
//! Reads one disclosure CSV restricted to the registry columns, keeps the rows
//! of allow-listed subjects sorted by identifier, tags the category and applies
//! the registry renames.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{ArrayRef, StringArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::{DisclosureError, Result};
use crate::filter::{AllowList, BatchFilter, IdentifierFilter, sort_by_identifier};
use crate::reader::{CsvOptions, CsvTableReader};
use crate::schema::{CATEGORY_COLUMN, Category, RenameMap, SchemaRegistry};
use crate::utils::logging::log_schema_info;

/// Read `columns` from `path`, keep allow-listed rows and sort them
///
/// The first entry of `columns` is the identifier column. It is returned as
/// `Int64`; every other column is `Utf8`.
pub fn process_csv<S: AsRef<str>>(
    path: &Path,
    columns: &[S],
    allow_list: &AllowList,
    options: &CsvOptions,
) -> Result<RecordBatch> {
    let id_column: &str = columns
        .first()
        .map(|c| c.as_ref())
        .ok_or_else(|| DisclosureError::Schema(format!("No columns requested for {}", path.display())))?;

    let start = Instant::now();
    let reader = CsvTableReader::open(path, columns, options)?;
    let schema = reader.schema();
    let filter = IdentifierFilter::new(id_column, allow_list);

    let mut rows_read = 0;
    let mut filtered = Vec::new();
    for batch in reader {
        let batch = batch?;
        rows_read += batch.num_rows();
        let kept = filter.filter(&batch)?;
        if kept.num_rows() > 0 {
            filtered.push(kept);
        }
    }
    log::info!("{}: {:?}", path.display(), (rows_read, schema.fields().len()));

    let combined = if filtered.is_empty() {
        filter.filter(&RecordBatch::new_empty(schema))?
    } else {
        let filtered_schema = filtered[0].schema();
        concat_batches(&filtered_schema, &filtered)?
    };

    let sorted = sort_by_identifier(&combined, id_column)?;
    log::info!(
        "{} filtered: {:?} in {:?}",
        path.display(),
        (sorted.num_rows(), sorted.num_columns()),
        start.elapsed()
    );

    Ok(sorted)
}

/// Append the literal category tag column
pub fn tag_category(batch: &RecordBatch, category: Category) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Field> = schema.fields().iter().map(|f| (**f).clone()).collect();
    fields.push(Field::new(CATEGORY_COLUMN, DataType::Utf8, false));

    let mut columns = batch.columns().to_vec();
    let tag: ArrayRef = Arc::new(StringArray::from(vec![category.code(); batch.num_rows()]));
    columns.push(tag);

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Rename the columns of `batch` according to `renames`
///
/// Columns not named in the map keep their names.
pub fn rename_columns(batch: &RecordBatch, renames: &RenameMap) -> Result<RecordBatch> {
    let schema = batch.schema();
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| (**field).clone().with_name(renames.renamed(field.name())))
        .collect();

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), batch.columns().to_vec())?)
}

/// Filter and normalize one disclosure file
///
/// `columns` must be the registry's read columns for `(category, year)`. The
/// rename map is looked up separately; when none is registered the columns keep
/// their source names.
pub fn normalize_disclosure<S: AsRef<str>>(
    path: &Path,
    columns: &[S],
    category: Category,
    year: u16,
    registry: &SchemaRegistry,
    allow_list: &AllowList,
    options: &CsvOptions,
) -> Result<RecordBatch> {
    let filtered = process_csv(path, columns, allow_list, options)?;
    let tagged = tag_category(&filtered, category)?;

    let normalized = match registry.renames(category, year) {
        Some(renames) => rename_columns(&tagged, renames)?,
        None => {
            log::debug!("No renames registered for {category} {year}; keeping source column names");
            tagged
        }
    };

    log_schema_info(&format!("{category} {year}"), &normalized);
    Ok(normalized)
}
