//! Prediction gateway
//!
//! Turns a [`PredictionRequest`] into a query against the trained model and
//! maps the first returned row onto a [`PredictionResult`]. Failures never
//! escape: they become sentinel results so the session keeps running.

use crate::display::Reporter;
use crate::errors::{AssistantError, Result};
use crate::service::{sql, AnalyticsService, ModelRef, QueryResult};
use crate::types::prediction::NO_EXPLANATION;
use crate::types::{PredictionRequest, PredictionResult};

/// Queries the trained model for one diagnosis at a time
#[derive(Debug, Clone)]
pub struct PredictionGateway {
    model: ModelRef,
    reporter: Reporter,
}

impl PredictionGateway {
    pub fn new(model: ModelRef, reporter: Reporter) -> Self {
        Self { model, reporter }
    }

    /// Predict a diagnosis; never fails
    pub async fn predict<S: AnalyticsService + ?Sized>(
        &self,
        service: &S,
        request: &PredictionRequest,
    ) -> PredictionResult {
        let query = sql::prediction_query(&self.model, request);
        self.reporter.debug(&format!("Running prediction query:\n{}", query));

        let spinner = self.reporter.spinner("Querying model...");
        let outcome = service.query(&query).await;
        spinner.finish_and_clear();

        match outcome.and_then(|result| self.map_result(&result)) {
            Ok(prediction) => prediction,
            Err(e) => {
                self.reporter.warning(&format!("Error during prediction: {}", e));
                PredictionResult::failed()
            }
        }
    }

    fn map_result(&self, result: &QueryResult) -> Result<PredictionResult> {
        self.reporter.debug(&format!("Prediction result: {:?}", result.rows));

        let row = match result.first() {
            Some(row) => row,
            None => return Ok(PredictionResult::no_results()),
        };

        let diagnosis = row.get_text(&self.model.target).ok_or_else(|| {
            AssistantError::Service(format!("result row has no '{}' column", self.model.target))
        })?;
        let explanation = row
            .get_text(&self.model.explain_column())
            .unwrap_or_else(|| NO_EXPLANATION.to_string());

        Ok(PredictionResult::new(diagnosis, explanation))
    }
}
