//! MindsDB service access
//!
//! [`AnalyticsService`] is the seam every other component talks through:
//! the HTTP client implements it for real runs, tests substitute a scripted
//! fake.

pub mod client;
pub mod connector;
pub mod sql;
pub mod types;

use async_trait::async_trait;

use crate::errors::{AssistantError, Result};

pub use client::MindsDbClient;
pub use connector::{connect, retry_fixed, RetryPolicy};
pub use types::{ModelRef, ModelStatus, QueryResult, Row};

/// Remote predictive-analytics service
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Execute one SQL statement and return its table
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Names of registered integrations and projects
    async fn list_databases(&self) -> Result<Vec<String>> {
        let result = self.query(sql::SHOW_DATABASES).await?;
        Ok(result.first_column_strings())
    }

    /// Register a file-backed integration
    async fn create_database(&self, name: &str, engine: &str, file_path: &str) -> Result<()> {
        self.query(&sql::create_database(name, engine, file_path)).await?;
        Ok(())
    }

    async fn create_project(&self, name: &str) -> Result<()> {
        self.query(&sql::create_project(name)).await?;
        Ok(())
    }

    /// Current training status of a model
    async fn model_status(&self, model: &ModelRef) -> Result<ModelStatus> {
        let result = self.query(&sql::model_status(model)).await?;
        let row = result.first().ok_or_else(|| {
            AssistantError::Service(format!("Model {} not found", model.qualified()))
        })?;

        Ok(ModelStatus {
            status: row.get_text("status").unwrap_or_else(|| "unknown".to_string()),
            error: row.get_text("error"),
        })
    }
}
