//! End-to-end pipeline tests: bundle files on disk through extraction,
//! consolidation and parquet write-out, read back for verification.

use chrono::NaiveDate;
use edsan::adapters::fs::process_directory;
use edsan::adapters::parquet::{read_table, write_tables};
use edsan::core::consolidate::ConsolidationOptions;
use edsan::core::extract::BuiltinRules;
use edsan::core::pipeline::{PipelineRun, ReferenceScope};
use edsan::domain::TargetTable;
use serde_json::json;
use std::fs;
use std::path::Path;

fn write_bundle(dir: &Path, name: &str, bundle: &serde_json::Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(bundle).unwrap()).unwrap();
}

fn sample_bundle() -> serde_json::Value {
    json!({
        "resourceType": "Bundle",
        "type": "collection",
        "entry": [
            {"resource": {
                "resourceType": "Patient",
                "id": "p1",
                "gender": "female",
                "birthDate": "1980-01-15"
            }},
            {"resource": {
                "resourceType": "Encounter",
                "id": "urn:uuid:e1",
                "subject": {"reference": "Patient/p1"},
                "period": {"start": "2020-06-01"},
                "location": [{"physicalType": {"text": "Cardiologie"}}]
            }},
            {"resource": {
                "resourceType": "Observation",
                "id": "o1",
                "subject": {"reference": "Patient/p1"},
                "encounter": {"reference": "Encounter/e1"},
                "effectiveDateTime": "2020-06-02",
                "code": {"text": "Créatinine"},
                "valueQuantity": {"value": 74.0, "unit": "umol/L"}
            }},
            {"resource": {
                "resourceType": "MedicationRequest",
                "id": "rx1",
                "subject": {"reference": "Patient/p1"},
                "encounter": {"reference": "Encounter/e1"},
                "medicationReference": {"reference": "Medication/m1"},
                "authoredOn": "2020-06-02"
            }},
            {"resource": {
                "resourceType": "Medication",
                "id": "m1",
                "code": {"coding": [{"code": "N02BE01", "display": "Paracetamol 500mg"}]}
            }}
        ]
    })
}

fn run_pipeline(input: &Path) -> edsan::domain::TableSet {
    let mut run = PipelineRun::new(Box::new(BuiltinRules::new()), ReferenceScope::Bundle);
    process_directory(&mut run, input).unwrap();
    let options = ConsolidationOptions {
        run_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        default_ward: "Service Général".to_string(),
    };
    run.finish(&options).unwrap()
}

#[test]
fn test_end_to_end_build_and_read_back() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_bundle(input.path(), "bundle1.json", &sample_bundle());

    let tables = run_pipeline(input.path());
    let written = write_tables(&tables, output.path()).unwrap();

    // One file per non-empty table: patient, mvt, biol, pharma
    assert_eq!(written.len(), 4);
    assert!(output.path().join("patient.parquet").exists());
    assert!(output.path().join("mvt.parquet").exists());
    assert!(!output.path().join("pmsi.parquet").exists());

    let patient = read_table(output.path().join("patient.parquet"))
        .unwrap()
        .unwrap();
    assert_eq!(patient.len(), 1);
    assert_eq!(patient[0]["PATID"], json!("p1"));
    assert_eq!(patient[0]["PATSEX"], json!("female"));
    // run date 2024-07-01 vs birth 1980-01-15
    assert_eq!(patient[0]["PATAGE"], json!(44));

    let movement = read_table(output.path().join("mvt.parquet"))
        .unwrap()
        .unwrap();
    assert_eq!(movement[0]["EVTID"], json!("e1"));
    assert_eq!(movement[0]["SEJUM"], json!("Cardiologie"));
    // age at the 2020-06-01 admission, not at the run date
    assert_eq!(movement[0]["PATAGE"], json!(40));
    assert_eq!(movement[0]["PATBD"], json!("1980-01-15"));

    let biology = read_table(output.path().join("biol.parquet"))
        .unwrap()
        .unwrap();
    assert_eq!(biology[0]["EVTID"], json!("e1"));
    assert_eq!(biology[0]["RESULT"], json!(74.0));
    assert_eq!(biology[0]["UNIT"], json!("umol/L"));

    let pharmacy = read_table(output.path().join("pharma.parquet"))
        .unwrap()
        .unwrap();
    assert_eq!(pharmacy[0]["ALLSPELABEL"], json!("Paracetamol 500mg"));
    assert_eq!(pharmacy[0]["ALLSPECODE"], json!("N02BE01"));
}

#[test]
fn test_missing_ward_defaults_in_output() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_bundle(
        input.path(),
        "bundle1.json",
        &json!({
            "resourceType": "Bundle",
            "entry": [
                {"resource": {
                    "resourceType": "Patient",
                    "id": "p1",
                    "birthDate": "1990-03-03"
                }},
                {"resource": {
                    "resourceType": "Encounter",
                    "id": "e1",
                    "subject": {"reference": "Patient/p1"},
                    "period": {"start": "2021-01-01"}
                }}
            ]
        }),
    );

    let tables = run_pipeline(input.path());
    write_tables(&tables, output.path()).unwrap();

    let movement = read_table(output.path().join("mvt.parquet"))
        .unwrap()
        .unwrap();
    assert_eq!(movement[0]["SEJUM"], json!("Service Général"));
}

#[test]
fn test_medication_resolved_across_bundles_with_run_scope() {
    let input = tempfile::tempdir().unwrap();
    write_bundle(
        input.path(),
        "a_medications.json",
        &json!({
            "resourceType": "Bundle",
            "entry": [
                {"resource": {
                    "resourceType": "Patient",
                    "id": "p1"
                }},
                {"resource": {
                    "resourceType": "Medication",
                    "id": "m9",
                    "code": {"coding": [{"code": "C09AA02", "display": "Enalapril"}]}
                }}
            ]
        }),
    );
    write_bundle(
        input.path(),
        "b_prescriptions.json",
        &json!({
            "resourceType": "Bundle",
            "entry": [
                {"resource": {
                    "resourceType": "MedicationRequest",
                    "id": "rx9",
                    "subject": {"reference": "Patient/p1"},
                    "medicationReference": {"reference": "Medication/m9"}
                }}
            ]
        }),
    );

    // Run scope keeps the dictionaries for the whole directory
    let mut run = PipelineRun::new(Box::new(BuiltinRules::new()), ReferenceScope::Run);
    process_directory(&mut run, input.path()).unwrap();
    let options = ConsolidationOptions {
        run_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        default_ward: "Service Général".to_string(),
    };
    let tables = run.finish(&options).unwrap();

    let rows = tables.rows(TargetTable::Pharmacy);
    assert_eq!(rows[0]["ALLSPELABEL"], json!("Enalapril"));

    // Bundle scope resets between files, so the same input falls back to null
    let mut run = PipelineRun::new(Box::new(BuiltinRules::new()), ReferenceScope::Bundle);
    process_directory(&mut run, input.path()).unwrap();
    let tables = run.finish(&options).unwrap();
    assert_eq!(tables.rows(TargetTable::Pharmacy)[0]["ALLSPELABEL"], json!(null));
}

#[test]
fn test_rerun_is_byte_identical() {
    let input = tempfile::tempdir().unwrap();
    write_bundle(input.path(), "bundle1.json", &sample_bundle());

    let out_a = tempfile::tempdir().unwrap();
    let out_b = tempfile::tempdir().unwrap();
    write_tables(&run_pipeline(input.path()), out_a.path()).unwrap();
    write_tables(&run_pipeline(input.path()), out_b.path()).unwrap();

    for table in TargetTable::ALL {
        let a = out_a.path().join(table.file_name());
        let b = out_b.path().join(table.file_name());
        assert_eq!(a.exists(), b.exists());
        if a.exists() {
            assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap(), "{table}");
        }
    }
}

#[test]
fn test_empty_directory_fails_consolidation() {
    let input = tempfile::tempdir().unwrap();
    let mut run = PipelineRun::new(Box::new(BuiltinRules::new()), ReferenceScope::Bundle);
    process_directory(&mut run, input.path()).unwrap();
    let options = ConsolidationOptions {
        run_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        default_ward: "Service Général".to_string(),
    };
    assert!(run.finish(&options).is_err());
}
