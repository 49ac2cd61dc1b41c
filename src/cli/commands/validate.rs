//! Validate config command implementation

use crate::config::load_config;
use crate::config::RulesKind;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config already runs validation
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("Configuration is valid");
                c
            }
            Err(e) => {
                println!("Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Bundle Directory: {}", config.input.bundle_dir);
        println!("  Output Directory: {}", config.output.dir);
        match config.extraction.rules {
            RulesKind::Builtin => println!("  Extraction Rules: builtin"),
            RulesKind::Mapping => {
                println!("  Extraction Rules: mapping");
                if let Some(path) = &config.extraction.mapping_file {
                    println!("  Mapping File: {path}");
                }
            }
        }
        println!("  Reference Scope: {:?}", config.extraction.reference_scope);
        println!("  Default Ward: {}", config.consolidation.default_ward);
        println!(
            "  Local Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
