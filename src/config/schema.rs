//! Configuration schema types
//!
//! This module defines the configuration structure mapped from the TOML
//! file (`edsan.toml` by default).

use crate::core::pipeline::ReferenceScope;
use serde::{Deserialize, Serialize};

/// Which extraction rule set drives the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesKind {
    /// The built-in, per-resource-type rule set
    #[default]
    Builtin,
    /// The configuration-loaded mapping rule set
    Mapping,
}

/// Main configuration
///
/// This is the root structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdsanConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input directory settings
    pub input: InputConfig,

    /// Extraction rule selection
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Consolidation business-rule settings
    #[serde(default)]
    pub consolidation: ConsolidationConfig,

    /// Output directory settings
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EdsanConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.input.validate()?;
        self.extraction.validate()?;
        self.consolidation.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory containing the FHIR bundle files (one JSON file per bundle)
    pub bundle_dir: String,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bundle_dir.trim().is_empty() {
            return Err("input.bundle_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Extraction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Rule set selection (builtin or mapping)
    #[serde(default)]
    pub rules: RulesKind,

    /// Path to the JSON mapping document (required when rules = "mapping")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_file: Option<String>,

    /// Cross-reference dictionary lifetime (bundle or run)
    #[serde(default)]
    pub reference_scope: ReferenceScope,
}

impl ExtractionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.rules == RulesKind::Mapping {
            match &self.mapping_file {
                Some(path) if !path.trim().is_empty() => {}
                _ => {
                    return Err(
                        "extraction.mapping_file is required when extraction.rules = 'mapping'"
                            .to_string(),
                    )
                }
            }
        }
        Ok(())
    }
}

/// Consolidation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationConfig {
    /// Substitute for a missing ward/service on movement rows
    #[serde(default = "default_ward")]
    pub default_ward: String,
}

impl ConsolidationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_ward.is_empty() {
            return Err("consolidation.default_ward cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            default_ward: default_ward(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the Parquet files (created if absent)
    pub dir: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dir.trim().is_empty() {
            return Err("output.dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log file rotation (daily, hourly)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid log rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ward() -> String {
    "Service Général".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
