//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file and, optionally, a sample mapping document.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "edsan.toml")]
    pub output: String,

    /// Also write a sample mapping document next to the configuration
    #[arg(long)]
    pub with_mapping: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        if let Err(e) = fs::write(&self.output, Self::generate_config()) {
            println!("Failed to write configuration file");
            println!("   Error: {e}");
            return Ok(5);
        }
        println!("Configuration file created: {}", self.output);

        if self.with_mapping {
            let mapping_path = "mapping.json";
            if Path::new(mapping_path).exists() && !self.force {
                println!("Mapping file already exists: {mapping_path}");
                println!("   Use --force to overwrite");
                return Ok(2);
            }
            if let Err(e) = fs::write(mapping_path, Self::generate_mapping()) {
                println!("Failed to write mapping file");
                println!("   Error: {e}");
                return Ok(5);
            }
            println!("Mapping file created: {mapping_path}");
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your directories", self.output);
        println!("  2. Validate configuration: edsan validate-config");
        println!("  3. Run the pipeline: edsan build");
        println!();
        Ok(0)
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Edsan Configuration File
# FHIR bundles to EDS warehouse tables

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[input]
# Directory containing the FHIR bundle files (one JSON file per bundle)
bundle_dir = "fhir"

[extraction]
# Rule set: "builtin" (fixed FHIR rules) or "mapping" (JSON mapping document)
rules = "builtin"

# Required when rules = "mapping"
# mapping_file = "mapping.json"

# Cross-reference dictionary lifetime: "bundle" (reset per bundle) or "run"
reference_scope = "bundle"

[consolidation]
# Substitute for a missing ward on movement rows
default_ward = "Service Général"

[output]
# Directory receiving the parquet tables
dir = "eds"

[logging]
# Enable local file logging
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate the sample mapping document
    fn generate_mapping() -> String {
        r#"{
  "Patient": {
    "table_name": "patient",
    "columns": {
      "PATID": "id",
      "PATSEX": "gender",
      "PATBD": "birthDate"
    }
  },
  "Encounter": {
    "table_name": "mvt",
    "columns": {
      "PATID": "subject.reference",
      "EVTID": "id",
      "ELTID": "id",
      "DATENT": "period.start",
      "SEJUM": "location.0.physicalType.text"
    }
  },
  "Observation": {
    "table_name": "biol",
    "columns": {
      "PATID": "subject.reference",
      "EVTID": "encounter.reference",
      "ELTID": "id",
      "PRLVTDATE": "effectiveDateTime",
      "PNAME": "code.text",
      "RESULT": "valueQuantity.value",
      "UNIT": "valueQuantity.unit"
    }
  }
}
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "edsan.toml".to_string(),
            with_mapping: false,
            force: false,
        };

        assert_eq!(args.output, "edsan.toml");
        assert!(!args.with_mapping);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_config_parses() {
        let config = InitArgs::generate_config();
        assert!(config.contains("[input]"));
        assert!(config.contains("[output]"));
        let parsed: crate::config::EdsanConfig = toml::from_str(&config).unwrap();
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_generate_mapping_parses() {
        let mapping = InitArgs::generate_mapping();
        let rules = crate::core::extract::MappingRules::from_json(&mapping).unwrap();
        assert!(!rules.is_empty());
    }
}
