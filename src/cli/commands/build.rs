//! Build command implementation
//!
//! This module implements the `build` command, which runs the full pipeline:
//! read bundles, extract, consolidate, write parquet tables, check quality.

use crate::config::{load_config, RulesKind};
use crate::core::extract::{BuiltinRules, ExtractionRules, MappingRules};
use crate::core::consolidate::ConsolidationOptions;
use crate::core::pipeline::PipelineRun;
use crate::core::quality::run_checks;
use clap::Args;

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Override the bundle input directory
    #[arg(long)]
    pub input: Option<String>,

    /// Override the table output directory
    #[arg(long)]
    pub output: Option<String>,

    /// Override the rule set (builtin or mapping)
    #[arg(long)]
    pub rules: Option<String>,

    /// Override the mapping file path
    #[arg(long)]
    pub mapping: Option<String>,

    /// Skip the quality checks after writing
    #[arg(long)]
    pub no_check: bool,
}

impl BuildArgs {
    /// Execute the build command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting build command");

        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if let Some(input) = &self.input {
            tracing::info!(input = %input, "Overriding bundle directory from CLI");
            config.input.bundle_dir = input.clone();
        }

        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding output directory from CLI");
            config.output.dir = output.clone();
        }

        if let Some(rules) = &self.rules {
            config.extraction.rules = match rules.to_lowercase().as_str() {
                "builtin" => RulesKind::Builtin,
                "mapping" => RulesKind::Mapping,
                _ => {
                    tracing::error!(rules = %rules, "Invalid rule set");
                    eprintln!("Invalid rule set: {rules}. Use 'builtin' or 'mapping'");
                    return Ok(2);
                }
            };
        }

        if let Some(mapping) = &self.mapping {
            config.extraction.mapping_file = Some(mapping.clone());
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let rules: Box<dyn ExtractionRules> = match config.extraction.rules {
            RulesKind::Builtin => Box::new(BuiltinRules::new()),
            RulesKind::Mapping => {
                let path = config
                    .extraction
                    .mapping_file
                    .as_deref()
                    .unwrap_or_default();
                match MappingRules::from_file(path) {
                    Ok(rules) => Box::new(rules),
                    Err(e) => {
                        tracing::error!(error = %e, path = %path, "Failed to load mapping file");
                        eprintln!("Failed to load mapping file {path}: {e}");
                        return Ok(2);
                    }
                }
            }
        };

        let mut run = PipelineRun::new(rules, config.extraction.reference_scope);

        let stats = match crate::adapters::fs::process_directory(&mut run, &config.input.bundle_dir)
        {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read bundle directory");
                eprintln!("Failed to read bundle directory: {e}");
                return Ok(5);
            }
        };

        let options = ConsolidationOptions {
            run_date: chrono::Local::now().date_naive(),
            default_ward: config.consolidation.default_ward.clone(),
        };

        let tables = match run.finish(&options) {
            Ok(tables) => tables,
            Err(e) => {
                tracing::error!(error = %e, "Pipeline failed");
                eprintln!("Build failed: {e}");
                return Ok(1);
            }
        };

        let written = match crate::adapters::parquet::write_tables(&tables, &config.output.dir) {
            Ok(written) => written,
            Err(e) => {
                tracing::error!(error = %e, "Failed to write tables");
                eprintln!("Failed to write tables: {e}");
                return Ok(5);
            }
        };

        println!("Build Summary:");
        println!(
            "  Bundles: {} processed, {} skipped ({} files found)",
            stats.files_read, stats.files_skipped, stats.files_found
        );
        for table in &written {
            println!("  {}: {} rows -> {}", table.table, table.rows, table.path.display());
        }
        println!();

        if self.no_check {
            println!("Quality checks skipped (--no-check)");
            return Ok(0);
        }

        let patient_rows = tables.rows(crate::domain::TargetTable::Patient);
        let movement_rows = tables.rows(crate::domain::TargetTable::Movement);
        let report = run_checks(
            (!patient_rows.is_empty()).then_some(patient_rows),
            (!movement_rows.is_empty()).then_some(movement_rows),
        );

        println!("Quality Checks:");
        for check in &report.checks {
            let status = if check.passed { "PASS" } else { "FAIL" };
            println!("  [{status}] {}: {}", check.name, check.detail);
        }
        println!();

        if report.passed() {
            println!("Build completed successfully");
            Ok(0)
        } else {
            println!(
                "Build completed with {} failed quality check(s)",
                report.failed_checks()
            );
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_defaults() {
        let args = BuildArgs {
            input: None,
            output: None,
            rules: None,
            mapping: None,
            no_check: false,
        };

        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert!(!args.no_check);
    }
}
