//! Configuration management
//!
//! Configuration is loaded from a TOML file with environment variable
//! substitution (`${VAR}` syntax) and `EDSAN_*` overrides.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ConsolidationConfig, EdsanConfig, ExtractionConfig, InputConfig,
    LoggingConfig, OutputConfig, RulesKind,
};
