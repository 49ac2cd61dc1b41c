//! Resource extraction
//!
//! Two interchangeable rule sets turn FHIR resources into output rows:
//! the built-in rules ([`BuiltinRules`]) with one precise extraction rule
//! per known resource type, and the configuration-driven mapping engine
//! ([`MappingRules`]) that generalizes to any resource type describable by
//! flat path expressions. Both implement [`ExtractionRules`] and feed the
//! same [`TableSet`], so the consolidator never knows which produced a row.

pub mod builtin;
pub mod mapping;
pub mod path;
pub mod xref;

pub use builtin::BuiltinRules;
pub use mapping::MappingRules;
pub use xref::{CrossReferences, EncounterInfo, MedicationInfo};

use crate::domain::TableSet;
use serde_json::Value;

/// A set of resource extraction rules.
///
/// The pipeline drives implementations through two passes per bundle:
/// [`index`](Self::index) is called for every resource first, giving the
/// rule set a chance to populate the cross-reference dictionaries, then
/// [`extract`](Self::extract) is called for every resource to produce rows.
///
/// Both methods are infallible: malformed or sparse resources degrade to
/// null fields or to no row at all, never to an aborted batch.
pub trait ExtractionRules {
    /// Indexing pass over one resource (cross-reference population).
    ///
    /// The default implementation does nothing; rule sets without
    /// cross-resource lookups can leave it alone.
    fn index(&self, resource: &Value, xref: &mut CrossReferences) {
        let _ = (resource, xref);
    }

    /// Extracting pass over one resource.
    fn extract(&self, resource: &Value, xref: &CrossReferences, tables: &mut TableSet);
}
