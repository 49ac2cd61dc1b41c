//! Core business logic.
//!
//! # Modules
//!
//! - [`extract`] - Path resolution, cross-reference dictionaries, and the
//!   two extraction rule sets (built-in and mapping-driven)
//! - [`pipeline`] - Run state owning the row buffers and dictionaries,
//!   two-pass bundle processing
//! - [`consolidate`] - Patient join, age derivation, business rules
//! - [`quality`] - Post-run data quality checks
//!
//! # Conversion workflow
//!
//! 1. **Pass 1**: index Medication/Encounter resources into the
//!    cross-reference dictionaries
//! 2. **Pass 2**: extract a row per clinical resource into the per-table
//!    buffers
//! 3. **Consolidate**: left-join fact tables to the patient master,
//!    derive `PATAGE`, apply business rules
//! 4. **Write**: materialize non-empty tables to Parquet
//!
//! # Example
//!
//! ```
//! use edsan::core::consolidate::ConsolidationOptions;
//! use edsan::core::extract::BuiltinRules;
//! use edsan::core::pipeline::{PipelineRun, ReferenceScope};
//! use edsan::domain::TargetTable;
//! use serde_json::json;
//!
//! let mut run = PipelineRun::new(Box::new(BuiltinRules::new()), ReferenceScope::Bundle);
//! run.process_bundle(&json!({
//!     "resourceType": "Bundle",
//!     "entry": [{"resource": {
//!         "resourceType": "Patient",
//!         "id": "p1",
//!         "gender": "female",
//!         "birthDate": "1980-01-01"
//!     }}]
//! }));
//!
//! let options = ConsolidationOptions {
//!     run_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!     default_ward: "Service Général".to_string(),
//! };
//! let tables = run.finish(&options).unwrap();
//! assert_eq!(tables.len(TargetTable::Patient), 1);
//! ```

pub mod consolidate;
pub mod extract;
pub mod pipeline;
pub mod quality;
