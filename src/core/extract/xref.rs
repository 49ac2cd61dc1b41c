//! Cross-reference dictionaries
//!
//! Prescriptions name their drug and documents name their stay only through
//! reference strings; the referenced details live on separate resources.
//! These lookups are filled in a first pass over a bundle so the second,
//! extracting pass can resolve them. Unknown keys resolve to `None` and the
//! dependent row is still produced with degraded fields.

use crate::domain::reference::CanonicalId;
use std::collections::HashMap;

/// Details of a Medication resource, keyed by canonical identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicationInfo {
    /// Coded identifier of the drug (`code.coding[0].code`)
    pub code: Option<String>,
    /// Display name of the drug (`code.coding[0].display`)
    pub display: Option<String>,
}

/// Details of an Encounter resource, keyed by canonical identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncounterInfo {
    /// Ward/service name (`location[0].physicalType.text`)
    pub ward: Option<String>,
    /// Exit location (`location[0].location.reference`, canonicalized)
    pub exit_location: Option<String>,
}

/// In-memory lookups consulted during the extracting pass.
#[derive(Debug, Default)]
pub struct CrossReferences {
    medications: HashMap<String, MedicationInfo>,
    encounters: HashMap<String, EncounterInfo>,
}

impl CrossReferences {
    /// Creates empty dictionaries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a medication discovered during the indexing pass.
    pub fn insert_medication(&mut self, id: CanonicalId, info: MedicationInfo) {
        self.medications.insert(id.into_inner(), info);
    }

    /// Records an encounter discovered during the indexing pass.
    pub fn insert_encounter(&mut self, id: CanonicalId, info: EncounterInfo) {
        self.encounters.insert(id.into_inner(), info);
    }

    /// Looks up a medication by canonical identifier.
    pub fn medication(&self, id: &str) -> Option<&MedicationInfo> {
        self.medications.get(id)
    }

    /// Looks up an encounter by canonical identifier.
    pub fn encounter(&self, id: &str) -> Option<&EncounterInfo> {
        self.encounters.get(id)
    }

    /// Number of indexed medications.
    pub fn medication_count(&self) -> usize {
        self.medications.len()
    }

    /// Number of indexed encounters.
    pub fn encounter_count(&self) -> usize {
        self.encounters.len()
    }

    /// Discards all entries. Called between bundles when references are
    /// bundle-scoped.
    pub fn clear(&mut self) {
        self.medications.clear();
        self.encounters.clear();
    }
}
