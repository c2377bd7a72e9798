//! Healthcare Diagnosis Assistant
//!
//! Terminal assistant that trains a MindsDB model over a local SQLite store
//! of patient records and answers diagnosis predictions interactively.
//!
//! # Architecture
//!
//! - **store**: local patient store (file, schema, row count)
//! - **service**: MindsDB HTTP client, connection retry, statement text
//! - **provisioning**: idempotent datasource/project/model setup
//! - **prediction**: model query and result mapping
//! - **session**: interactive input/predict/display loop
//! - **orchestrator**: startup sequence tying it together

pub mod errors;
pub mod types;
pub mod cli;
pub mod display;
pub mod store;
pub mod service;
pub mod provisioning;
pub mod prediction;
pub mod session;
pub mod orchestrator;
pub mod doctor;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use errors::{AssistantError, Result};
pub use display::Reporter;
