//! Quality checks over parquet files written by the pipeline.

use edsan::adapters::parquet::{read_table, write_tables};
use edsan::core::quality::run_checks;
use edsan::domain::{Row, TableSet, TargetTable};
use serde_json::json;

fn row(cells: &[(&str, serde_json::Value)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_checks_on_written_tables_pass() {
    let out = tempfile::tempdir().unwrap();

    let mut tables = TableSet::new();
    tables.push(
        TargetTable::Patient,
        row(&[("PATID", json!("p1")), ("PATSEX", json!("female"))]),
    );
    tables.push(
        TargetTable::Patient,
        row(&[("PATID", json!("p2")), ("PATSEX", json!("male"))]),
    );
    tables.push(
        TargetTable::Movement,
        row(&[("PATID", json!("p1")), ("EVTID", json!("e1"))]),
    );
    write_tables(&tables, out.path()).unwrap();

    let patient = read_table(out.path().join("patient.parquet")).unwrap();
    let movement = read_table(out.path().join("mvt.parquet")).unwrap();

    let report = run_checks(patient.as_deref(), movement.as_deref());
    assert!(report.passed());
    assert_eq!(report.total_violations(), 0);
}

#[test]
fn test_missing_patient_file_fails() {
    let out = tempfile::tempdir().unwrap();

    let patient = read_table(out.path().join("patient.parquet")).unwrap();
    assert!(patient.is_none());

    let report = run_checks(patient.as_deref(), None);
    assert!(!report.passed());
    assert_eq!(report.failed_checks(), 1);
}

#[test]
fn test_orphan_movements_detected_after_round_trip() {
    let out = tempfile::tempdir().unwrap();

    let mut tables = TableSet::new();
    tables.push(TargetTable::Patient, row(&[("PATID", json!("p1"))]));
    tables.push(TargetTable::Movement, row(&[("PATID", json!("p1"))]));
    tables.push(TargetTable::Movement, row(&[("PATID", json!("ghost"))]));
    write_tables(&tables, out.path()).unwrap();

    let patient = read_table(out.path().join("patient.parquet")).unwrap();
    let movement = read_table(out.path().join("mvt.parquet")).unwrap();

    let report = run_checks(patient.as_deref(), movement.as_deref());
    assert!(!report.passed());
    assert_eq!(report.total_violations(), 1);

    // The report serializes for the --json output of the check command
    let rendered = serde_json::to_string(&report).unwrap();
    assert!(rendered.contains("mvt.referential_integrity"));
}
