//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Edsan using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Edsan - FHIR to EDS warehouse ETL tool
#[derive(Parser, Debug)]
#[command(name = "edsan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "edsan.toml", env = "EDSAN_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "EDSAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the warehouse tables from a directory of FHIR bundles
    Build(commands::build::BuildArgs),

    /// Run quality checks against previously built tables
    Check(commands::check::CheckArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
