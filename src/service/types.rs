//! MindsDB SQL API wire types

use serde::Deserialize;
use serde_json::Value;

use crate::cli::config::ProvisioningConfig;
use crate::errors::{AssistantError, Result};

/// Raw body of `POST /api/sql/query`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl QueryResponse {
    /// Convert into a table, turning `error` responses into service errors
    pub fn into_result(self) -> Result<QueryResult> {
        if self.kind == "error" {
            let message = self
                .error_message
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(AssistantError::Service(message));
        }

        let rows = self
            .data
            .into_iter()
            .map(|values| Row::new(self.column_names.iter().cloned().zip(values).collect()))
            .collect();

        Ok(QueryResult {
            columns: self.column_names,
            rows,
        })
    }
}

/// Tabular query result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.fields.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// String values of the first column, skipping non-strings
    pub fn first_column_strings(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.fields.first())
            .filter_map(|(_, value)| value.as_str().map(str::to_string))
            .collect()
    }
}

/// One result row as ordered column/value pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    /// Look up a column, ignoring case
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    /// Column rendered as text; null and missing columns are `None`
    pub fn get_text(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Trained model status as reported by the `models` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    pub status: String,
    pub error: Option<String>,
}

impl ModelStatus {
    pub fn is_complete(&self) -> bool {
        self.status.eq_ignore_ascii_case("complete")
    }

    pub fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case("error")
    }
}

/// Fully qualified prediction model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub project: String,
    pub model: String,
    pub target: String,
}

impl ModelRef {
    pub fn new(project: impl Into<String>, model: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            model: model.into(),
            target: target.into(),
        }
    }

    pub fn from_config(config: &ProvisioningConfig) -> Self {
        Self::new(&config.project, &config.model, &config.target)
    }

    /// `project.model`
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.project, self.model)
    }

    /// Column MindsDB fills with the explanation for the target
    pub fn explain_column(&self) -> String {
        format!("{}_explain", self.target)
    }
}
