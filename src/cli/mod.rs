//! CLI module for the diagnosis assistant
//! 
//! Handles command-line argument parsing and configuration management.

pub mod config;
pub mod args;

pub use config::{Config, ProvisioningMode};
pub use args::{Args, Commands, Verbosity};
