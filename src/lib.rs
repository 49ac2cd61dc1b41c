//! # Edsan - FHIR to EDS warehouse ETL
//!
//! Edsan converts directories of FHIR bundles into the six flat tables of
//! a clinical data warehouse (EDS), written as Parquet files.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** rows from FHIR resources, with built-in rules or a
//!   configuration-driven mapping document
//! - **Resolving** cross-references between resources (medications,
//!   encounters) in a first indexing pass
//! - **Consolidating** fact tables against the patient master (sex, birth
//!   date, age at event) and applying business rules
//! - **Writing** the tables as Parquet and checking their quality
//!
//! ## Architecture
//!
//! Edsan follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (extraction, pipeline, consolidation, quality)
//! - [`adapters`] - Filesystem scanning and Parquet I/O
//! - [`domain`] - Core domain types (tables, rows, identifiers, errors)
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edsan::adapters::{fs, parquet};
//! use edsan::core::consolidate::ConsolidationOptions;
//! use edsan::core::extract::BuiltinRules;
//! use edsan::core::pipeline::{PipelineRun, ReferenceScope};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut run = PipelineRun::new(Box::new(BuiltinRules::new()), ReferenceScope::Bundle);
//!     fs::process_directory(&mut run, "fhir")?;
//!
//!     let options = ConsolidationOptions {
//!         run_date: chrono::Local::now().date_naive(),
//!         default_ward: "Service Général".to_string(),
//!     };
//!     let tables = run.finish(&options)?;
//!     parquet::write_tables(&tables, "eds")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Edsan uses the [`domain::EdsanError`] type for all errors:
//!
//! ```rust,no_run
//! use edsan::domain::EdsanError;
//!
//! fn example() -> Result<(), EdsanError> {
//!     let config = edsan::config::load_config("edsan.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
