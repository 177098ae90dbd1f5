//! Table shape diagnostics
//!
//! Shapes are reported as `(rows, columns)`.

use arrow::record_batch::RecordBatch;

/// The `(rows, columns)` shape of a batch
#[must_use]
pub fn shape(batch: &RecordBatch) -> (usize, usize) {
    (batch.num_rows(), batch.num_columns())
}

/// Log the shape of a batch under a label
pub fn log_shape(label: &str, batch: &RecordBatch) {
    log::info!("{label}: {:?}", shape(batch));
}

/// Log the column names and types of a batch at debug level
pub fn log_schema_info(label: &str, batch: &RecordBatch) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    log::debug!("{label} schema:");
    for field in batch.schema().fields() {
        log::debug!("  - {} ({})", field.name(), field.data_type());
    }
}
