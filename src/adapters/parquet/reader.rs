//! Parquet table reader
//!
//! Loads written tables back into row form for the data quality checks.
//! Only the types the writer produces (Utf8, Int64, Float64) are mapped;
//! anything else degrades to null.

use crate::domain::tables::Row;
use crate::domain::Result;
use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

/// Reads a table file into rows.
///
/// Returns `Ok(None)` when the file does not exist; the quality checks
/// treat an absent table differently from a broken one.
pub fn read_table(path: impl AsRef<Path>) -> Result<Option<Vec<Row>>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        append_batch(&batch?, &mut rows);
    }
    Ok(Some(rows))
}

fn append_batch(batch: &RecordBatch, rows: &mut Vec<Row>) {
    let schema = batch.schema();
    for row_idx in 0..batch.num_rows() {
        let mut row = Row::new();
        for (col_idx, field) in schema.fields().iter().enumerate() {
            let column = batch.column(col_idx);
            let value = if column.is_null(row_idx) {
                Value::Null
            } else {
                match field.data_type() {
                    DataType::Utf8 => column
                        .as_any()
                        .downcast_ref::<StringArray>()
                        .map(|arr| Value::String(arr.value(row_idx).to_string()))
                        .unwrap_or(Value::Null),
                    DataType::Int64 => column
                        .as_any()
                        .downcast_ref::<Int64Array>()
                        .map(|arr| Value::from(arr.value(row_idx)))
                        .unwrap_or(Value::Null),
                    DataType::Float64 => column
                        .as_any()
                        .downcast_ref::<Float64Array>()
                        .map(|arr| Value::from(arr.value(row_idx)))
                        .unwrap_or(Value::Null),
                    _ => Value::Null,
                }
            };
            row.insert(field.name().clone(), value);
        }
        rows.push(row);
    }
}
