//! Domain models and types.
//!
//! This module contains the core domain vocabulary of the converter:
//!
//! - **Canonical identifiers** ([`CanonicalId`]) — references with all
//!   known prefixes stripped, the join key of the whole pipeline
//! - **Target tables and rows** ([`TargetTable`], [`Row`], [`TableSet`])
//! - **Error types** ([`EdsanError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```
//! use edsan::domain::{EdsanError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(EdsanError::Consolidation("no patient rows".to_string()))
//! }
//! assert!(example().is_err());
//! ```

pub mod errors;
pub mod reference;
pub mod result;
pub mod tables;

// Re-export commonly used types for convenience
pub use errors::EdsanError;
pub use reference::{strip_reference_prefixes, CanonicalId, REFERENCE_PREFIXES};
pub use result::Result;
pub use tables::{columns, Row, TableSet, TargetTable};
