//! Type definitions module
//! 
//! Patient records and prediction values shared across the assistant.

pub mod patient;
pub use patient::{Gender, PatientRecord};

pub mod prediction;
pub use prediction::{PredictionRequest, PredictionResult};
