//! Parquet table writer
//!
//! Materializes the finished row buffers as one Parquet file per non-empty
//! table. The column set of a table is the union of all row keys in
//! first-seen order; missing cells become nulls. Column types are inferred
//! from the values: all-integer columns become Int64, numeric columns
//! Float64, everything else Utf8.

use crate::domain::tables::{Row, TableSet, TargetTable};
use crate::domain::Result;
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use indexmap::IndexSet;
use parquet::arrow::ArrowWriter;
use serde_json::Value;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One table materialized on disk.
#[derive(Debug, Clone)]
pub struct WrittenTable {
    /// Which table was written
    pub table: TargetTable,
    /// Where the file landed
    pub path: PathBuf,
    /// Number of rows written
    pub rows: usize,
}

/// Writes every non-empty table of the set into `out_dir`.
///
/// Empty tables are skipped with an informational log; a corpus without
/// documents is a valid outcome, not an error.
pub fn write_tables(tables: &TableSet, out_dir: impl AsRef<Path>) -> Result<Vec<WrittenTable>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for (table, rows) in tables.iter() {
        if rows.is_empty() {
            tracing::info!(table = %table, "Table is empty, no file generated");
            continue;
        }

        let path = out_dir.join(table.file_name());
        write_rows(rows, &path)?;
        tracing::info!(table = %table, rows = rows.len(), file = %path.display(), "Table written");
        written.push(WrittenTable {
            table,
            path,
            rows: rows.len(),
        });
    }
    Ok(written)
}

/// Writes one row buffer as a Parquet file.
pub fn write_rows(rows: &[Row], path: &Path) -> Result<()> {
    let batch = rows_to_batch(rows)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Inferred storage type of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn merge(self, other: ColumnKind) -> ColumnKind {
        use ColumnKind::*;
        match (self, other) {
            (Text, _) | (_, Text) => Text,
            (Float, _) | (_, Float) => Float,
            (Int, Int) => Int,
        }
    }

    fn of(value: &Value) -> Option<ColumnKind> {
        match value {
            Value::Null => None,
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(ColumnKind::Int),
            Value::Number(_) => Some(ColumnKind::Float),
            _ => Some(ColumnKind::Text),
        }
    }
}

/// Converts a row buffer into an Arrow record batch.
fn rows_to_batch(rows: &[Row]) -> Result<RecordBatch> {
    // Union of row keys, first-seen order, so the file layout only depends
    // on the input order.
    let mut column_names: IndexSet<String> = IndexSet::new();
    for row in rows {
        for key in row.keys() {
            column_names.insert(key.clone());
        }
    }

    let mut fields = Vec::with_capacity(column_names.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(column_names.len());

    for name in &column_names {
        let kind = rows
            .iter()
            .filter_map(|row| row.get(name).and_then(ColumnKind::of))
            .fold(None, |acc: Option<ColumnKind>, k| {
                Some(acc.map_or(k, |a| a.merge(k)))
            })
            .unwrap_or(ColumnKind::Text);

        let (data_type, array): (DataType, ArrayRef) = match kind {
            ColumnKind::Int => {
                let values: Vec<Option<i64>> = rows
                    .iter()
                    .map(|row| row.get(name).and_then(Value::as_i64))
                    .collect();
                (DataType::Int64, Arc::new(Int64Array::from(values)))
            }
            ColumnKind::Float => {
                let values: Vec<Option<f64>> = rows
                    .iter()
                    .map(|row| row.get(name).and_then(Value::as_f64))
                    .collect();
                (DataType::Float64, Arc::new(Float64Array::from(values)))
            }
            ColumnKind::Text => {
                let values: Vec<Option<String>> =
                    rows.iter().map(|row| text_cell(row.get(name))).collect();
                (DataType::Utf8, Arc::new(StringArray::from(values)))
            }
        };

        fields.push(Field::new(name, data_type, true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(schema, arrays)?)
}

fn text_cell(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
