//! Data quality validation
//!
//! Post-run checks over the written tables: volumetrics, key uniqueness,
//! referential integrity. Exposed through the `check` CLI command.

pub mod checks;
pub mod report;

pub use checks::run_checks;
pub use report::{QualityCheck, QualityReport};
