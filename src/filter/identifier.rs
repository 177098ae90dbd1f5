//! Identifier allow-list filtering
//!
//! Subject identifiers arrive as text but are compared by integer value, so
//! `"0101"` and `"101"` name the same subject. The filtered batch carries the
//! identifier column as `Int64`.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use super::core::{BatchFilter, filter_record_batch, take_rows};
use crate::error::{DisclosureError, Result};

/// Parse an identifier by integer value
///
/// Surrounding whitespace is ignored and integral decimals such as `"101.0"`
/// are accepted. Anything else is not an identifier.
#[must_use]
pub fn parse_identifier(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 => {
            Some(value as i64)
        }
        _ => None,
    }
}

/// Convert an identifier column to `Int64`, turning unparseable values into nulls
pub fn identifier_array(array: &ArrayRef, column: &str) -> Result<Int64Array> {
    match array.data_type() {
        DataType::Int64 => Ok(array
            .as_any()
            .downcast_ref::<Int64Array>()
            .cloned()
            .ok_or_else(|| DisclosureError::Schema(format!("Column '{column}' is not an Int64 array")))?),
        DataType::Utf8 => {
            let strings = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| DisclosureError::Schema(format!("Column '{column}' is not a string array")))?;
            Ok(strings.iter().map(|value| value.and_then(parse_identifier)).collect())
        }
        other => Err(DisclosureError::Schema(format!(
            "Column '{column}' has type {other}, expected text or integer identifiers"
        ))),
    }
}

/// The identifiers of the subjects of interest
///
/// Keeps every identifier in the order supplied, duplicates included, and
/// answers membership by value.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    ids: Vec<i64>,
    members: FxHashSet<i64>,
}

impl AllowList {
    #[must_use]
    pub fn new(ids: Vec<i64>) -> Self {
        let members = ids.iter().copied().collect();
        Self { ids, members }
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.members.contains(&id)
    }

    /// Identifiers in supplied order, duplicates included
    #[must_use]
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Number of identifiers supplied, duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of distinct identifiers
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.members.len()
    }
}

impl FromIterator<i64> for AllowList {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A filter that keeps only rows whose identifier is in an allow-list
#[derive(Debug, Clone)]
pub struct IdentifierFilter<'a> {
    column: String,
    allow_list: &'a AllowList,
}

impl<'a> IdentifierFilter<'a> {
    #[must_use]
    pub fn new(column: impl Into<String>, allow_list: &'a AllowList) -> Self {
        Self {
            column: column.into(),
            allow_list,
        }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl BatchFilter for IdentifierFilter<'_> {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let idx = batch.schema().index_of(&self.column).map_err(|_| {
            DisclosureError::Schema(format!("Identifier column '{}' not found", self.column))
        })?;

        let ids = identifier_array(batch.column(idx), &self.column)?;
        let mask: BooleanArray = ids
            .iter()
            .map(|id| Some(id.is_some_and(|id| self.allow_list.contains(id))))
            .collect();

        let typed = with_column_replaced(batch, idx, Arc::new(ids))?;
        filter_record_batch(&typed, &mask)
    }
}

/// Replace column `idx` of `batch`, adopting the new column's data type
fn with_column_replaced(batch: &RecordBatch, idx: usize, column: ArrayRef) -> Result<RecordBatch> {
    let schema = batch.schema();
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            if i == idx {
                Field::new(field.name(), column.data_type().clone(), true)
            } else {
                (**field).clone()
            }
        })
        .collect();

    let mut columns = batch.columns().to_vec();
    columns[idx] = column;

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Stable ascending sort of `batch` by an identifier column
///
/// Rows without an identifier sort last, keeping their relative order.
pub fn sort_by_identifier(batch: &RecordBatch, column: &str) -> Result<RecordBatch> {
    let idx = batch
        .schema()
        .index_of(column)
        .map_err(|_| DisclosureError::Schema(format!("Sort column '{column}' not found")))?;
    let ids = identifier_array(batch.column(idx), column)?;

    let mut order: Vec<(Option<i64>, u32)> = ids
        .iter()
        .enumerate()
        .map(|(row, id)| (id, row as u32))
        .collect();
    order.sort_by_key(|(id, _)| (id.is_none(), *id));

    take_rows(batch, order.into_iter().map(|(_, row)| row).collect())
}
