//! Pipeline run state and bundle processing
//!
//! A [`PipelineRun`] owns everything a conversion accumulates: the row
//! buffers and the cross-reference dictionaries. Nothing is ambient or
//! global, so two runs never share state. The run is a pure
//! bundles-in/tables-out function: feed bundles with
//! [`process_bundle`](PipelineRun::process_bundle), then call
//! [`finish`](PipelineRun::finish) to consolidate and take the tables.
//! Directory scanning and file reading live in the filesystem adapter.

use crate::core::consolidate::{consolidate, ConsolidationOptions};
use crate::core::extract::{CrossReferences, ExtractionRules};
use crate::domain::{Result, TableSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifetime of the cross-reference dictionaries.
///
/// `Bundle` resets them between bundles (the documented two-pass design);
/// `Run` accumulates them across the whole run, letting a later bundle's
/// prescription resolve against an earlier bundle's medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceScope {
    /// Dictionaries are bundle-local
    #[default]
    Bundle,
    /// Dictionaries accumulate across all bundles of the run
    Run,
}

/// State of one conversion run.
pub struct PipelineRun {
    rules: Box<dyn ExtractionRules>,
    reference_scope: ReferenceScope,
    xref: CrossReferences,
    tables: TableSet,
    bundles_processed: usize,
    bundles_skipped: usize,
}

impl PipelineRun {
    /// Creates a run with empty buffers and dictionaries.
    pub fn new(rules: Box<dyn ExtractionRules>, reference_scope: ReferenceScope) -> Self {
        Self {
            rules,
            reference_scope,
            xref: CrossReferences::new(),
            tables: TableSet::new(),
            bundles_processed: 0,
            bundles_skipped: 0,
        }
    }

    /// Processes one bundle: indexing pass, then extracting pass.
    ///
    /// A document without an `entry` array is not a bundle worth failing
    /// over; it is counted and skipped. Sparse or malformed resources
    /// degrade to null fields inside the extraction rules.
    pub fn process_bundle(&mut self, bundle: &Value) {
        let Some(entries) = bundle.get("entry").and_then(Value::as_array) else {
            tracing::debug!("Bundle has no entry array, skipping");
            self.bundles_skipped += 1;
            return;
        };

        if self.reference_scope == ReferenceScope::Bundle {
            self.xref.clear();
        }

        for entry in entries {
            let resource = entry.get("resource").unwrap_or(&Value::Null);
            self.rules.index(resource, &mut self.xref);
        }

        for entry in entries {
            let resource = entry.get("resource").unwrap_or(&Value::Null);
            self.rules.extract(resource, &self.xref, &mut self.tables);
        }

        self.bundles_processed += 1;
    }

    /// Row buffers accumulated so far.
    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Number of bundles processed.
    pub fn bundles_processed(&self) -> usize {
        self.bundles_processed
    }

    /// Number of bundles skipped (no `entry` array).
    pub fn bundles_skipped(&self) -> usize {
        self.bundles_skipped
    }

    /// Consolidates and returns the finished tables.
    ///
    /// # Errors
    ///
    /// Fails when the run produced no patient rows; see
    /// [`consolidate`](crate::core::consolidate::consolidate).
    pub fn finish(mut self, options: &ConsolidationOptions) -> Result<TableSet> {
        tracing::info!(
            bundles = self.bundles_processed,
            skipped = self.bundles_skipped,
            medications_indexed = self.xref.medication_count(),
            encounters_indexed = self.xref.encounter_count(),
            "Extraction complete, consolidating"
        );
        consolidate(&mut self.tables, options)?;
        Ok(self.tables)
    }
}
