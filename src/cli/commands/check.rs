//! Check command implementation
//!
//! Runs the data quality checks against tables written by a previous
//! `build` run, without rebuilding them.

use crate::adapters::parquet::read_table;
use crate::config::load_config;
use crate::core::quality::run_checks;
use crate::domain::TargetTable;
use clap::Args;
use std::path::Path;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Override the table directory to check
    #[arg(long)]
    pub dir: Option<String>,

    /// Print the report as JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting check command");

        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => {
                let config = match load_config(config_path) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to load configuration");
                        eprintln!("Failed to load configuration: {e}");
                        return Ok(2);
                    }
                };
                config.output.dir
            }
        };

        let dir = Path::new(&dir);
        let patient = read_table(dir.join(TargetTable::Patient.file_name()))?;
        let movement = read_table(dir.join(TargetTable::Movement.file_name()))?;

        let report = run_checks(patient.as_deref(), movement.as_deref());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("Quality Checks ({}):", dir.display());
            for check in &report.checks {
                let status = if check.passed { "PASS" } else { "FAIL" };
                println!("  [{status}] {}: {}", check.name, check.detail);
            }
            println!();
            println!(
                "{} check(s), {} failed, {} violation(s)",
                report.checks.len(),
                report.failed_checks(),
                report.total_violations()
            );
        }

        if report.passed() {
            Ok(0)
        } else {
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_args_defaults() {
        let args = CheckArgs {
            dir: None,
            json: false,
        };
        assert!(args.dir.is_none());
        assert!(!args.json);
    }
}
