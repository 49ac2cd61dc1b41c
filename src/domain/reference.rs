//! Canonical identifiers for cross-resource references
//!
//! FHIR resources point at each other with reference strings such as
//! `Patient/p1` or `urn:uuid:123-abc`. Joins across the output tables only
//! work if every form naming the same resource collapses to the same key,
//! so all known prefixes are stripped before an identifier is used anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference prefix tokens recognized in identifiers and reference strings.
pub const REFERENCE_PREFIXES: &[&str] = &[
    "urn:uuid:",
    "Patient/",
    "Encounter/",
    "Practitioner/",
    "Medication/",
    "Observation/",
    "Procedure/",
    "Condition/",
    "MedicationRequest/",
    "Location/",
    "DiagnosticReport/",
    "DocumentReference/",
];

/// Strips every occurrence of every known reference prefix.
///
/// Idempotent: a string with no prefixes left is returned unchanged.
pub fn strip_reference_prefixes(raw: &str) -> String {
    let mut cleaned = raw.to_string();
    for prefix in REFERENCE_PREFIXES {
        if cleaned.contains(prefix) {
            cleaned = cleaned.replace(prefix, "");
        }
    }
    cleaned
}

/// Canonical resource identifier newtype wrapper
///
/// Holds an identifier with all known reference prefixes removed. This is
/// the join key used across every output table (`PATID`, `EVTID`, `ELTID`).
///
/// # Examples
///
/// ```
/// use edsan::domain::reference::CanonicalId;
///
/// let id = CanonicalId::from_raw("urn:uuid:123-abc").unwrap();
/// assert_eq!(id.as_str(), "123-abc");
///
/// let same = CanonicalId::from_raw("123-abc").unwrap();
/// assert_eq!(id, same);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalId(String);

impl CanonicalId {
    /// Creates a canonical identifier from a raw id or reference string.
    ///
    /// Returns `None` if the input is empty or reduces to empty after
    /// prefix stripping; a missing reference is a null field, not an error.
    pub fn from_raw(raw: impl AsRef<str>) -> Option<Self> {
        let cleaned = strip_reference_prefixes(raw.as_ref());
        if cleaned.trim().is_empty() {
            return None;
        }
        Some(Self(cleaned))
    }

    /// Creates a canonical identifier from a JSON value, if it is a
    /// non-empty string.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        value.as_str().and_then(Self::from_raw)
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CanonicalId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw(s).ok_or_else(|| "identifier cannot be empty".to_string())
    }
}

impl AsRef<str> for CanonicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
