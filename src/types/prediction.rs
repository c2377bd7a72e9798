//! Prediction request and result values

use serde::{Deserialize, Serialize};

use crate::types::patient::Gender;

/// Diagnosis shown when no real prediction could be produced
pub const UNABLE_TO_PREDICT: &str = "Unable to predict";

/// Explanation for an empty result set
pub const NO_RESULTS_EXPLANATION: &str = "No results returned from the model";

/// Explanation when the remote call failed
pub const PREDICTION_ERROR_EXPLANATION: &str = "An error occurred during prediction";

/// Explanation when the model row carries none
pub const NO_EXPLANATION: &str = "No explanation provided";

/// Operator input for one prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub age: u32,
    pub gender: Gender,
    pub symptom1: String,
    pub symptom2: String,
    pub symptom3: String,
}

impl PredictionRequest {
    /// Symptoms with surrounding whitespace removed, in order
    pub fn trimmed_symptoms(&self) -> [&str; 3] {
        [
            self.symptom1.trim(),
            self.symptom2.trim(),
            self.symptom3.trim(),
        ]
    }
}

/// Diagnosis and explanation returned to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub diagnosis: String,
    pub diagnosis_explain: String,
}

impl PredictionResult {
    pub fn new(diagnosis: impl Into<String>, diagnosis_explain: impl Into<String>) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            diagnosis_explain: diagnosis_explain.into(),
        }
    }

    /// Sentinel for an empty result set
    pub fn no_results() -> Self {
        Self::new(UNABLE_TO_PREDICT, NO_RESULTS_EXPLANATION)
    }

    /// Sentinel for a failed remote call
    pub fn failed() -> Self {
        Self::new(UNABLE_TO_PREDICT, PREDICTION_ERROR_EXPLANATION)
    }

    /// Whether this is one of the sentinel results
    pub fn is_sentinel(&self) -> bool {
        self.diagnosis == UNABLE_TO_PREDICT
    }
}
