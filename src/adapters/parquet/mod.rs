//! Columnar storage adapter (Parquet via Arrow)

pub mod reader;
pub mod writer;

pub use reader::read_table;
pub use writer::{write_tables, WrittenTable};
