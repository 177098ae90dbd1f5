//! Schema-diagonal concatenation
//!
//! Tables from different categories and eras carry different columns. The union
//! schema holds every column in first-appearance order; rows from a table that
//! lacks a column are null there.

use std::sync::Arc;

use arrow::array::{ArrayRef, new_null_array};
use arrow::compute::concat_batches;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::error::{DisclosureError, Result};

/// Build the union of the schemas of `batches`
///
/// Every field is nullable in the union. A column that appears with two
/// different data types is a schema error.
pub fn union_schema(batches: &[RecordBatch]) -> Result<SchemaRef> {
    let mut fields: Vec<Field> = Vec::new();
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();

    for batch in batches {
        for field in batch.schema().fields() {
            match positions.get(field.name()) {
                Some(&idx) => {
                    let existing = &fields[idx];
                    if existing.data_type() != field.data_type() {
                        return Err(DisclosureError::Schema(format!(
                            "Column '{}' has conflicting types {} and {}",
                            field.name(),
                            existing.data_type(),
                            field.data_type()
                        )));
                    }
                }
                None => {
                    positions.insert(field.name().clone(), fields.len());
                    fields.push(Field::new(field.name(), field.data_type().clone(), true));
                }
            }
        }
    }

    Ok(Arc::new(Schema::new(fields)))
}

/// Project `batch` onto `schema`, filling absent columns with nulls
fn align_to_schema(batch: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch> {
    let batch_schema = batch.schema();
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| match batch_schema.index_of(field.name()) {
            Ok(idx) => Arc::clone(batch.column(idx)),
            Err(_) => new_null_array(field.data_type(), batch.num_rows()),
        })
        .collect();

    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Concatenate `batches` with schema-union semantics
///
/// Fails with [`DisclosureError::NoTables`] when `batches` is empty.
pub fn concat_diagonal(batches: &[RecordBatch]) -> Result<RecordBatch> {
    if batches.is_empty() {
        return Err(DisclosureError::NoTables);
    }

    let schema = union_schema(batches)?;
    let aligned = batches
        .iter()
        .map(|batch| align_to_schema(batch, &schema))
        .collect::<Result<Vec<_>>>()?;

    Ok(concat_batches(&schema, &aligned)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array, StringArray};
    use arrow::datatypes::DataType;

    fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
        RecordBatch::try_from_iter(columns).unwrap()
    }

    #[test]
    fn test_disjoint_columns_are_null_filled() {
        let a = batch(vec![(
            "A",
            Arc::new(StringArray::from(vec!["a1", "a2"])) as ArrayRef,
        )]);
        let b = batch(vec![("B", Arc::new(Int64Array::from(vec![7])) as ArrayRef)]);

        let combined = concat_diagonal(&[a, b]).unwrap();
        assert_eq!(combined.num_rows(), 3);
        assert_eq!(combined.schema().field(0).name(), "A");
        assert_eq!(combined.schema().field(1).name(), "B");

        let col_b = combined.column(1);
        assert!(col_b.is_null(0));
        assert!(col_b.is_null(1));
        assert!(!col_b.is_null(2));

        let col_a = combined.column(0);
        assert_eq!(col_a.null_count(), 1);
        assert!(col_a.is_null(2));
    }

    #[test]
    fn test_shared_columns_keep_first_appearance_order() {
        let a = batch(vec![
            ("Profile_ID", Arc::new(Int64Array::from(vec![1])) as ArrayRef),
            ("NPI", Arc::new(StringArray::from(vec!["n"])) as ArrayRef),
        ]);
        let b = batch(vec![
            ("Study", Arc::new(StringArray::from(vec!["s"])) as ArrayRef),
            ("Profile_ID", Arc::new(Int64Array::from(vec![2])) as ArrayRef),
        ]);

        let schema = union_schema(&[a, b]).unwrap();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, vec!["Profile_ID", "NPI", "Study"]);
        assert_eq!(schema.field(0).data_type(), &DataType::Int64);
    }

    #[test]
    fn test_type_conflict_is_schema_error() {
        let a = batch(vec![("X", Arc::new(Int64Array::from(vec![1])) as ArrayRef)]);
        let b = batch(vec![("X", Arc::new(StringArray::from(vec!["1"])) as ArrayRef)]);

        let err = concat_diagonal(&[a, b]).unwrap_err();
        assert!(matches!(err, DisclosureError::Schema(_)));
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(matches!(concat_diagonal(&[]), Err(DisclosureError::NoTables)));
    }
}
