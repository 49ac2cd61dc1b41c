//! Quality checks over the produced tables
//!
//! Downstream contract for a finished run: the patient master table exists
//! and is non-empty, its `PATID` values are unique, and every movement row
//! points at a known patient. An absent movement table is a valid outcome
//! of a partial mapping, not a failure.

use super::report::QualityReport;
use crate::domain::tables::{columns, Row};
use std::collections::HashSet;

/// Runs all quality checks.
///
/// `patient` and `movement` are the row sets read back from the output
/// directory; `None` means the table file is absent.
pub fn run_checks(patient: Option<&[Row]>, movement: Option<&[Row]>) -> QualityReport {
    let mut report = QualityReport::new();

    let patient_ids = match patient {
        None => {
            report.record_failure("patient.present", 1, "patient table file is missing");
            return report;
        }
        Some(rows) => {
            check_patient(rows, &mut report);
            collect_ids(rows)
        }
    };

    match movement {
        None => {
            report.record_pass(
                "mvt.present",
                "movement table absent (valid for a partial mapping)",
            );
        }
        Some(rows) => check_movement(rows, &patient_ids, &mut report),
    }

    report
}

fn check_patient(rows: &[Row], report: &mut QualityReport) {
    if rows.is_empty() {
        report.record_failure("patient.volumetrics", 1, "patient table is empty");
    } else {
        report.record_pass("patient.volumetrics", format!("{} rows", rows.len()));
    }

    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    for row in rows {
        if let Some(id) = row.get(columns::PATID).and_then(|v| v.as_str()) {
            if !seen.insert(id.to_string()) {
                duplicates += 1;
            }
        }
    }

    if duplicates == 0 {
        report.record_pass("patient.unique_patid", "no duplicate identifiers");
    } else {
        report.record_failure(
            "patient.unique_patid",
            duplicates,
            format!("{duplicates} duplicate identifiers"),
        );
    }
}

fn check_movement(rows: &[Row], patient_ids: &HashSet<String>, report: &mut QualityReport) {
    let orphans = rows
        .iter()
        .filter(|row| {
            row.get(columns::PATID)
                .and_then(|v| v.as_str())
                .map(|id| !patient_ids.contains(id))
                .unwrap_or(true)
        })
        .count();

    if orphans == 0 {
        report.record_pass(
            "mvt.referential_integrity",
            format!("{} rows all linked to known patients", rows.len()),
        );
    } else {
        report.record_failure(
            "mvt.referential_integrity",
            orphans,
            format!("{orphans} movement rows reference an unknown patient"),
        );
    }
}

fn collect_ids(rows: &[Row]) -> HashSet<String> {
    rows.iter()
        .filter_map(|row| row.get(columns::PATID).and_then(|v| v.as_str()))
        .map(str::to_string)
        .collect()
}
