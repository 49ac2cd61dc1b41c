//! Configuration-driven mapping rule engine
//!
//! The declarative alternative to the built-in rules: an external JSON
//! document maps each resource type name to a target table and a
//! column→path dictionary, and every declared path is resolved through the
//! tolerant path resolver. Less precise than the built-in rules (no
//! cross-reference dictionaries, no ordered date fallbacks) but it
//! generalizes to any resource type describable by flat path expressions.
//!
//! Mapping document shape:
//!
//! ```json
//! {
//!   "Patient": {
//!     "table_name": "patient.parquet",
//!     "columns": {
//!       "PATID": "id",
//!       "PATSEX": "gender",
//!       "PATBD": "birthDate"
//!     }
//!   }
//! }
//! ```

use super::path;
use super::xref::CrossReferences;
use super::ExtractionRules;
use crate::domain::tables::{Row, TableSet, TargetTable};
use crate::domain::{EdsanError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One declarative rule: where rows go and which paths fill which columns.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingRule {
    /// Target table name (`"mvt"` or `"mvt.parquet"`)
    pub table_name: String,
    /// Column name → path expression, in declared (output) order
    pub columns: IndexMap<String, String>,
}

/// The configuration-loaded rule set.
#[derive(Debug)]
pub struct MappingRules {
    rules: IndexMap<String, (TargetTable, MappingRule)>,
}

impl MappingRules {
    /// Loads mapping rules from a JSON file.
    ///
    /// A missing or unreadable mapping file is fatal for the run: the batch
    /// must not proceed with zero rules.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            EdsanError::Configuration(format!(
                "Failed to read mapping file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Parses mapping rules from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: IndexMap<String, MappingRule> = serde_json::from_str(json)
            .map_err(|e| EdsanError::Mapping(format!("Invalid mapping document: {e}")))?;

        if raw.is_empty() {
            return Err(EdsanError::Mapping(
                "Mapping document declares no rules".to_string(),
            ));
        }

        let mut rules = IndexMap::new();
        for (resource_type, rule) in raw {
            let table = TargetTable::from_name(&rule.table_name).ok_or_else(|| {
                EdsanError::Mapping(format!(
                    "Unknown target table '{}' for resource type '{}'",
                    rule.table_name, resource_type
                ))
            })?;
            rules.insert(resource_type, (table, rule));
        }

        Ok(Self { rules })
    }

    /// Number of declared rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule is declared (never the case after a successful load).
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resource type names covered by the rules.
    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl ExtractionRules for MappingRules {
    fn extract(&self, resource: &Value, _xref: &CrossReferences, tables: &mut TableSet) {
        let Some(rtype) = resource.get("resourceType").and_then(Value::as_str) else {
            return;
        };
        let Some((table, rule)) = self.rules.get(rtype) else {
            return;
        };

        let mut row = Row::new();
        for (column, path_expr) in &rule.columns {
            row.insert(column.clone(), path::resolve(resource, path_expr));
        }
        tables.push(*table, row);
    }
}
