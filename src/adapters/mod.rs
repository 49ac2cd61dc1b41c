//! External integrations.
//!
//! - [`fs`] - Input directory scanning and tolerant bundle reading
//! - [`parquet`] - Columnar table writing and read-back

pub mod fs;
pub mod parquet;
