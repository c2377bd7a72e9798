//! Scripted stand-ins for MindsDB and the operator terminal
//!
//! Drives provisioning, prediction and whole sessions in the unit tests
//! without a running server or a tty.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::errors::{AssistantError, Result};
use crate::service::{AnalyticsService, QueryResult, Row};
use crate::session::Terminal;
use crate::types::PredictionResult;

#[derive(Debug, Default)]
struct FakeState {
    databases: Vec<String>,
    projects: Vec<String>,
    models: Vec<String>,
    model_status: String,
    failures: Vec<(String, String)>,
    prediction_rows: Vec<Row>,
    statements: Vec<String>,
}

/// In-memory MindsDB that understands the statements the assistant sends
///
/// Creates are remembered, so repeating one is rejected with an
/// "already exists" error just like the real server.
#[derive(Debug)]
pub struct FakeService {
    state: Mutex<FakeState>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                databases: vec!["information_schema".to_string(), "files".to_string()],
                projects: vec!["mindsdb".to_string()],
                model_status: "complete".to_string(),
                ..FakeState::default()
            }),
        }
    }

    /// Integrations that already exist
    pub fn with_databases(self, names: &[&str]) -> Self {
        self.lock()
            .databases
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Status reported for any trained model
    pub fn with_model_status(self, status: &str) -> Self {
        self.lock().model_status = status.to_string();
        self
    }

    /// Reject statements starting with `prefix` using `message`
    pub fn failing_on(self, prefix: &str, message: &str) -> Self {
        self.lock()
            .failures
            .push((prefix.to_string(), message.to_string()));
        self
    }

    /// Single prediction row
    pub fn with_prediction(self, diagnosis: &str, explanation: Option<&str>) -> Self {
        let mut fields = vec![("diagnosis".to_string(), json!(diagnosis))];
        if let Some(explanation) = explanation {
            fields.push(("diagnosis_explain".to_string(), json!(explanation)));
        }
        self.with_prediction_rows(vec![Row::new(fields)])
    }

    pub fn with_prediction_rows(self, rows: Vec<Row>) -> Self {
        self.lock().prediction_rows = rows;
        self
    }

    /// Every statement received, in order
    pub fn statements(&self) -> Vec<String> {
        self.lock().statements.clone()
    }

    pub fn statements_starting_with(&self, prefix: &str) -> Vec<String> {
        self.lock()
            .statements
            .iter()
            .filter(|s| s.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Statements other than reads (`SHOW`) and predictions (`SELECT`)
    pub fn provisioning_statements(&self) -> Vec<String> {
        self.lock()
            .statements
            .iter()
            .filter(|s| s.starts_with("CREATE"))
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        // A panicking test poisons the lock; the data is still usable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for FakeService {
    fn default() -> Self {
        Self::new()
    }
}

/// Name following `keyword` in `sql`, e.g. the project in `CREATE PROJECT x`
fn name_after(sql: &str, keyword: &str) -> String {
    sql[keyword.len()..]
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

fn single_column(column: &str, values: &[String]) -> QueryResult {
    QueryResult::from_rows(
        values
            .iter()
            .map(|v| Row::new(vec![(column.to_string(), Value::String(v.clone()))]))
            .collect(),
    )
}

#[async_trait]
impl AnalyticsService for FakeService {
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        let mut state = self.lock();
        state.statements.push(sql.to_string());

        if let Some((_, message)) = state.failures.iter().find(|(prefix, _)| sql.starts_with(prefix.as_str())) {
            return Err(AssistantError::Service(message.clone()));
        }

        if sql.starts_with("SHOW DATABASES") {
            let mut names = state.databases.clone();
            names.extend(state.projects.iter().cloned());
            return Ok(single_column("Database", &names));
        }

        if sql.starts_with("CREATE DATABASE") {
            let name = name_after(sql, "CREATE DATABASE");
            if state.databases.contains(&name) {
                return Err(AssistantError::Service(format!("Database '{}' already exists", name)));
            }
            state.databases.push(name);
            return Ok(QueryResult::empty());
        }

        if sql.starts_with("CREATE PROJECT") {
            let name = name_after(sql, "CREATE PROJECT");
            if state.projects.contains(&name) {
                return Err(AssistantError::Service(format!("Project '{}' already exists", name)));
            }
            state.projects.push(name);
            return Ok(QueryResult::empty());
        }

        if sql.starts_with("CREATE MODEL") {
            let name = name_after(sql, "CREATE MODEL");
            if state.models.contains(&name) {
                return Err(AssistantError::Service(format!("Model '{}' already exists", name)));
            }
            state.models.push(name);
            return Ok(QueryResult::empty());
        }

        if sql.starts_with("SELECT status") {
            let row = Row::new(vec![
                ("STATUS".to_string(), Value::String(state.model_status.clone())),
                ("ERROR".to_string(), Value::Null),
            ]);
            return Ok(QueryResult::from_rows(vec![row]));
        }

        if sql.starts_with("SELECT") {
            return Ok(QueryResult::from_rows(state.prediction_rows.clone()));
        }

        Ok(QueryResult::empty())
    }
}

/// Terminal fed from a fixed list of lines
///
/// Reaches end of input once the lines run out.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    notices: Vec<String>,
    results: Vec<PredictionResult>,
    headers: usize,
}

impl ScriptedTerminal {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            inputs: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Prompts shown, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Predictions shown, in order
    pub fn results(&self) -> &[PredictionResult] {
        &self.results
    }

    pub fn headers(&self) -> usize {
        self.headers
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn show_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn show_header(&mut self) {
        self.headers += 1;
    }

    fn show_prediction(&mut self, result: &PredictionResult) {
        self.results.push(result.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_rejects_duplicate_create() {
        let service = FakeService::new();
        service.create_project("health_diagnosis").await.unwrap();
        let err = service.create_project("health_diagnosis").await.unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_fake_lists_databases_and_projects() {
        let service = FakeService::new().with_databases(&["health_data"]);
        let names = service.list_databases().await.unwrap();
        assert!(names.contains(&"health_data".to_string()));
        assert!(names.contains(&"mindsdb".to_string()));
    }

    #[test]
    fn test_scripted_terminal_end_of_input() {
        let mut terminal = ScriptedTerminal::new(&["one"]);
        assert_eq!(terminal.read_line("> ").unwrap().as_deref(), Some("one"));
        assert_eq!(terminal.read_line("> ").unwrap(), None);
        assert_eq!(terminal.prompts().len(), 2);
        assert_eq!(terminal.remaining_inputs(), 0);
    }
}
