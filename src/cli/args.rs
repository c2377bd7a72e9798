//! Command-line argument parsing for the diagnosis assistant
//! 
//! Provides clap-based CLI with subcommands, config overrides and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::config::{Config, ProvisioningMode};

/// Diagnosis assistant - predict diagnoses from symptoms with a MindsDB model
#[derive(Parser, Debug)]
#[command(name = "diagnosis-assistant")]
#[command(version)]
#[command(about = "Terminal healthcare diagnosis assistant backed by MindsDB", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// MindsDB host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// MindsDB HTTP port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Patient store file (overrides config)
    #[arg(long = "db", value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Abort on any provisioning error instead of warning
    #[arg(long)]
    pub strict: bool,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run health checks against MindsDB and the patient store
    Doctor,

    /// Display the effective configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.service.host = host.clone();
        }
        if let Some(port) = self.port {
            config.service.port = port;
        }
        if let Some(path) = &self.db_path {
            config.store.path = path.clone();
        }
        if self.strict {
            config.provisioning.mode = ProvisioningMode::Strict;
        }
    }
}

impl Verbosity {
    /// Check if should show progress messages and spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show query text and raw rows
    pub fn show_queries(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Check if should show HTTP-level detail
    pub fn show_wire(&self) -> bool {
        matches!(self, Verbosity::VeryVerbose)
    }
}
