//! Consolidation: patient join, age derivation, business rules
//!
//! The last transformation stage before write-out. Every fact table is
//! left-joined to the patient master table on `PATID` to pick up the birth
//! date and gender, `PATAGE` is derived from the table's event-date column,
//! and the enumerated business rules are applied. Unresolved patients or
//! dates yield null ages, never a failed join; an empty patient master
//! table is the one fatal condition here.

pub mod age;

use crate::domain::tables::{columns, TableSet, TargetTable};
use crate::domain::{EdsanError, Result};
use age::compute_age;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

/// Consolidation settings.
#[derive(Debug, Clone)]
pub struct ConsolidationOptions {
    /// Processing date used to derive the patient master table's `PATAGE`
    pub run_date: NaiveDate,
    /// Substitute for a missing ward/service field on movement rows
    pub default_ward: String,
}

/// Joins, derives and applies business rules across all tables in place.
///
/// Business rules are an explicit, enumerable set:
/// 1. patient table: `PATAGE` from birth date vs. the run date;
/// 2. movement table: missing `SEJUM` replaced by the configured default.
///
/// # Errors
///
/// Returns [`EdsanError::Consolidation`] when the patient master table is
/// empty: every dependent table's derivation needs it, and silently writing
/// orphaned fact tables would poison downstream quality checks.
pub fn consolidate(tables: &mut TableSet, options: &ConsolidationOptions) -> Result<()> {
    let patients = patient_index(tables);
    if patients.is_empty() {
        return Err(EdsanError::Consolidation(
            "No patient rows extracted; cannot consolidate dependent tables".to_string(),
        ));
    }

    let run_date = options.run_date.format("%Y-%m-%d").to_string();
    for row in tables.rows_mut(TargetTable::Patient) {
        let birth = cell_str(row.get(columns::PATBD));
        let age = compute_age(birth.as_deref(), Some(&run_date));
        row.insert(columns::PATAGE.to_string(), age_value(age));
    }

    for table in TargetTable::ALL {
        if table == TargetTable::Patient {
            continue;
        }
        let date_column = table.event_date_column();

        for row in tables.rows_mut(table) {
            let patid = cell_str(row.get(columns::PATID));
            let patient = patid.as_deref().and_then(|id| patients.get(id));

            let (birth, sex) = match patient {
                Some((birth, sex)) => (birth.clone(), sex.clone()),
                None => (None, None),
            };
            row.insert(columns::PATSEX.to_string(), opt_value(sex));
            row.insert(columns::PATBD.to_string(), opt_value(birth.clone()));

            if let Some(column) = date_column {
                let event = cell_str(row.get(column));
                let age = compute_age(birth.as_deref(), event.as_deref());
                row.insert(columns::PATAGE.to_string(), age_value(age));
            }

            if table == TargetTable::Movement {
                let missing = row
                    .get(columns::SEJUM)
                    .map(Value::is_null)
                    .unwrap_or(true);
                if missing {
                    row.insert(
                        columns::SEJUM.to_string(),
                        Value::String(options.default_ward.clone()),
                    );
                }
            }
        }
    }

    Ok(())
}

/// PATID → (birth date, gender) from the patient master table.
fn patient_index(tables: &TableSet) -> HashMap<String, (Option<String>, Option<String>)> {
    let mut index = HashMap::new();
    for row in tables.rows(TargetTable::Patient) {
        if let Some(patid) = cell_str(row.get(columns::PATID)) {
            index.insert(
                patid,
                (
                    cell_str(row.get(columns::PATBD)),
                    cell_str(row.get(columns::PATSEX)),
                ),
            );
        }
    }
    index
}

fn cell_str(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn opt_value(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}

fn age_value(age: Option<i64>) -> Value {
    age.map(Value::from).unwrap_or(Value::Null)
}
