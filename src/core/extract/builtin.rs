//! Built-in extraction rules
//!
//! One extraction rule per known FHIR resource type, dispatched on the
//! resource type tag. This is the precise rule set: it resolves the patient
//! and encounter references, applies the declared date fallback orders, and
//! consults the cross-reference dictionaries for drug names and ward labels.

use super::path::{resolve_raw, resolve_string};
use super::xref::{CrossReferences, EncounterInfo, MedicationInfo};
use super::ExtractionRules;
use crate::domain::reference::CanonicalId;
use crate::domain::tables::{columns, Row, TableSet, TargetTable};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

/// Sentinel stored when a document resource carries no extractable text.
pub const TEXT_NOT_EXTRACTED: &str = "Non extrait";

/// The built-in, hardcoded rule set.
#[derive(Debug, Default)]
pub struct BuiltinRules;

impl BuiltinRules {
    /// Creates the built-in rule set.
    pub fn new() -> Self {
        Self
    }
}

impl ExtractionRules for BuiltinRules {
    fn index(&self, resource: &Value, xref: &mut CrossReferences) {
        let Some(id) = CanonicalId::from_value(resource.get("id").unwrap_or(&Value::Null)) else {
            return;
        };

        match resource.get("resourceType").and_then(Value::as_str) {
            Some("Medication") => {
                xref.insert_medication(
                    id,
                    MedicationInfo {
                        code: resolve_string(resource, "code.coding[0].code"),
                        display: resolve_string(resource, "code.coding[0].display"),
                    },
                );
            }
            Some("Encounter") => {
                xref.insert_encounter(
                    id,
                    EncounterInfo {
                        ward: resolve_string(resource, "location[0].physicalType.text"),
                        exit_location: canonical(resource, "location[0].location.reference")
                            .map(CanonicalId::into_inner),
                    },
                );
            }
            _ => {}
        }
    }

    fn extract(&self, resource: &Value, xref: &CrossReferences, tables: &mut TableSet) {
        let Some(rtype) = resource.get("resourceType").and_then(Value::as_str) else {
            return;
        };
        let rid = CanonicalId::from_value(resource.get("id").unwrap_or(&Value::Null));

        // First non-null of subject.reference / patient.reference, canonicalized
        let patient_ref = canonical(resource, "subject.reference")
            .or_else(|| canonical(resource, "patient.reference"));

        match rtype {
            "Patient" => extract_patient(resource, rid, tables),
            "Encounter" => extract_encounter(resource, rid, patient_ref, tables),
            "Observation" => extract_observation(resource, rid, patient_ref, tables),
            "MedicationRequest" => extract_prescription(resource, rid, patient_ref, xref, tables),
            "Condition" | "Procedure" => extract_pmsi(rtype, resource, rid, patient_ref, tables),
            "DiagnosticReport" | "DocumentReference" => {
                extract_document(rtype, resource, rid, patient_ref, xref, tables)
            }
            _ => {}
        }
    }
}

fn extract_patient(resource: &Value, rid: Option<CanonicalId>, tables: &mut TableSet) {
    let mut row = Row::new();
    row.insert(columns::PATID.to_string(), id_value(rid));
    row.insert(
        columns::PATSEX.to_string(),
        resolve_raw(resource, "gender"),
    );
    row.insert(
        columns::PATBD.to_string(),
        resolve_raw(resource, "birthDate"),
    );
    tables.push(TargetTable::Patient, row);
}

fn extract_encounter(
    resource: &Value,
    rid: Option<CanonicalId>,
    patient_ref: Option<CanonicalId>,
    tables: &mut TableSet,
) {
    let rid = id_value(rid);
    let mut row = Row::new();
    row.insert(columns::PATID.to_string(), id_value(patient_ref));
    row.insert(columns::EVTID.to_string(), rid.clone());
    row.insert(columns::ELTID.to_string(), rid);
    row.insert(
        columns::DATENT.to_string(),
        resolve_raw(resource, "period.start"),
    );
    row.insert(
        columns::SEJUM.to_string(),
        resolve_raw(resource, "location[0].physicalType.text"),
    );
    row.insert(
        columns::SEJUF.to_string(),
        id_value(canonical(resource, "location[0].location.reference")),
    );
    tables.push(TargetTable::Movement, row);
}

fn extract_observation(
    resource: &Value,
    rid: Option<CanonicalId>,
    patient_ref: Option<CanonicalId>,
    tables: &mut TableSet,
) {
    // Only quantitative observations land in the biology table; the rest
    // (coded findings, free-text notes) are skipped without error.
    let quantity = match resource.get("valueQuantity") {
        Some(q) if !q.is_null() => q,
        _ => return,
    };

    let mut row = Row::new();
    row.insert(columns::PATID.to_string(), id_value(patient_ref));
    row.insert(
        columns::EVTID.to_string(),
        id_value(canonical(resource, "encounter.reference")),
    );
    row.insert(columns::ELTID.to_string(), id_value(rid));
    row.insert(
        columns::PRLVTDATE.to_string(),
        first_date(resource, &["effectiveDateTime", "issued"]),
    );
    row.insert(
        columns::PNAME.to_string(),
        resolve_raw(resource, "code.text"),
    );
    row.insert(
        columns::RESULT.to_string(),
        quantity.get("value").cloned().unwrap_or(Value::Null),
    );
    row.insert(
        columns::UNIT.to_string(),
        quantity.get("unit").cloned().unwrap_or(Value::Null),
    );
    tables.push(TargetTable::Biology, row);
}

fn extract_prescription(
    resource: &Value,
    rid: Option<CanonicalId>,
    patient_ref: Option<CanonicalId>,
    xref: &CrossReferences,
    tables: &mut TableSet,
) {
    let med_ref = canonical(resource, "medicationReference.reference");
    let med_info = med_ref
        .as_ref()
        .and_then(|id| xref.medication(id.as_str()));

    // Dictionary display name wins; inline codeable-concept text is the
    // fallback for out-of-bundle medications.
    let label = med_info
        .and_then(|info| info.display.clone())
        .map(Value::String)
        .unwrap_or_else(|| resolve_raw(resource, "medicationCodeableConcept.text"));
    let code = med_info
        .and_then(|info| info.code.clone())
        .map(Value::String)
        .unwrap_or(Value::Null);

    let mut row = Row::new();
    row.insert(columns::PATID.to_string(), id_value(patient_ref));
    row.insert(
        columns::EVTID.to_string(),
        id_value(canonical(resource, "encounter.reference")),
    );
    row.insert(columns::ELTID.to_string(), id_value(rid));
    row.insert(columns::ALLSPELABEL.to_string(), label);
    row.insert(columns::ALLSPECODE.to_string(), code);
    row.insert(
        columns::DATPRES.to_string(),
        resolve_raw(resource, "authoredOn"),
    );
    row.insert(
        columns::PRES.to_string(),
        resolve_raw(resource, "dosageInstruction[0].text"),
    );
    tables.push(TargetTable::Pharmacy, row);
}

fn extract_pmsi(
    rtype: &str,
    resource: &Value,
    rid: Option<CanonicalId>,
    patient_ref: Option<CanonicalId>,
    tables: &mut TableSet,
) {
    let label = match resolve_raw(resource, "code.text") {
        Value::Null => resolve_raw(resource, "code.coding[0].display"),
        text => text,
    };

    let mut row = Row::new();
    row.insert(columns::PATID.to_string(), id_value(patient_ref));
    row.insert(
        columns::EVTID.to_string(),
        id_value(canonical(resource, "encounter.reference")),
    );
    row.insert(columns::ELTID.to_string(), id_value(rid));
    row.insert(columns::TYPE.to_string(), Value::String(rtype.to_string()));
    row.insert(
        columns::CODE.to_string(),
        resolve_raw(resource, "code.coding[0].code"),
    );
    row.insert(columns::LIBELLE.to_string(), label);
    row.insert(
        columns::DATENT.to_string(),
        first_date(
            resource,
            &["onsetDateTime", "performedDateTime", "recordedDate"],
        ),
    );
    tables.push(TargetTable::Pmsi, row);
}

fn extract_document(
    rtype: &str,
    resource: &Value,
    rid: Option<CanonicalId>,
    patient_ref: Option<CanonicalId>,
    xref: &CrossReferences,
    tables: &mut TableSet,
) {
    let encounter_ref = canonical(resource, "encounter.reference");
    let ward = encounter_ref
        .as_ref()
        .and_then(|id| xref.encounter(id.as_str()))
        .and_then(|info| info.ward.clone())
        .map(Value::String)
        .unwrap_or(Value::Null);

    let data_path = match rtype {
        "DiagnosticReport" => "presentedForm[0].data",
        _ => "content[0].attachment.data",
    };

    let mut row = Row::new();
    row.insert(columns::PATID.to_string(), id_value(patient_ref));
    row.insert(columns::EVTID.to_string(), id_value(encounter_ref));
    row.insert(columns::ELTID.to_string(), id_value(rid));
    row.insert(
        columns::RECTXT.to_string(),
        document_text(resolve_raw(resource, data_path)),
    );
    row.insert(
        columns::RECDATE.to_string(),
        first_date(resource, &["effectiveDateTime", "date", "created"]),
    );
    row.insert(columns::RECTYPE.to_string(), Value::String(rtype.to_string()));
    row.insert(columns::SEJUM.to_string(), ward);
    tables.push(TargetTable::Document, row);
}

/// Canonicalizes a reference found at `path`, if present.
fn canonical(resource: &Value, path: &str) -> Option<CanonicalId> {
    CanonicalId::from_value(&resolve_raw(resource, path))
}

/// A canonical identifier as a row cell, null when absent.
fn id_value(id: Option<CanonicalId>) -> Value {
    id.map(|i| Value::String(i.into_inner()))
        .unwrap_or(Value::Null)
}

/// First non-null date among the candidate fields, in declared priority
/// order, with `performedPeriod.start` as the final fallback. The order is
/// part of the extraction contract: downstream age derivation depends on
/// picking the first available signal deterministically.
fn first_date(resource: &Value, candidates: &[&str]) -> Value {
    for path in candidates {
        let value = resolve_raw(resource, path);
        if !value.is_null() {
            return value;
        }
    }
    resolve_raw(resource, "performedPeriod.start")
}

/// Document text from a FHIR attachment.
///
/// Attachment payloads arrive base64-encoded; well-formed UTF-8 payloads
/// are decoded to readable text, anything else is kept verbatim so no data
/// is lost. A missing attachment yields the [`TEXT_NOT_EXTRACTED`] sentinel.
fn document_text(data: Value) -> Value {
    match data {
        Value::String(raw) => match BASE64.decode(raw.as_bytes()) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Value::String(text),
                Err(_) => Value::String(raw),
            },
            Err(_) => Value::String(raw),
        },
        _ => Value::String(TEXT_NOT_EXTRACTED.to_string()),
    }
}
