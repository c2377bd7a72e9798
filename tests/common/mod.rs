//! Shared doubles for the integration tests
//!
//! A MindsDB stand-in that remembers what was created and a terminal fed
//! from a fixed list of lines.

#![allow(dead_code)]

use async_trait::async_trait;
use diagnosis_assistant::{
    service::{AnalyticsService, QueryResult, Row},
    session::Terminal,
    types::PredictionResult,
    AssistantError, Result,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct ServerState {
    databases: Vec<String>,
    projects: Vec<String>,
    models: Vec<String>,
    failures: Vec<(String, String)>,
    prediction: Option<(String, Option<String>)>,
    statements: Vec<String>,
}

/// MindsDB that rejects a repeated create with "already exists"
#[derive(Debug)]
pub struct FakeService {
    state: Mutex<ServerState>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ServerState {
                databases: vec!["information_schema".to_string(), "files".to_string()],
                projects: vec!["mindsdb".to_string()],
                ..ServerState::default()
            }),
        }
    }

    pub fn with_prediction(self, diagnosis: &str, explanation: Option<&str>) -> Self {
        self.lock().prediction = Some((diagnosis.to_string(), explanation.map(str::to_string)));
        self
    }

    /// Reject statements starting with `prefix`
    pub fn failing_on(self, prefix: &str, message: &str) -> Self {
        self.lock().failures.push((prefix.to_string(), message.to_string()));
        self
    }

    pub fn statements_starting_with(&self, prefix: &str) -> Vec<String> {
        self.lock()
            .statements
            .iter()
            .filter(|s| s.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn provisioning_statements(&self) -> Vec<String> {
        self.statements_starting_with("CREATE")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn create_once(known: &mut Vec<String>, kind: &str, sql: &str, keyword: &str) -> Result<QueryResult> {
    let name = sql[keyword.len()..]
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    if known.contains(&name) {
        return Err(AssistantError::Service(format!("{} '{}' already exists", kind, name)));
    }
    known.push(name);
    Ok(QueryResult::empty())
}

fn text_row(fields: &[(&str, Value)]) -> Row {
    Row::new(fields.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
}

#[async_trait]
impl AnalyticsService for FakeService {
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        let mut state = self.lock();
        state.statements.push(sql.to_string());

        if let Some((_, message)) = state.failures.iter().find(|(p, _)| sql.starts_with(p.as_str())) {
            return Err(AssistantError::Service(message.clone()));
        }

        if sql.starts_with("SHOW DATABASES") {
            let names: Vec<String> = state.databases.iter().chain(&state.projects).cloned().collect();
            return Ok(QueryResult::from_rows(
                names
                    .into_iter()
                    .map(|n| text_row(&[("Database", Value::String(n))]))
                    .collect(),
            ));
        }
        if sql.starts_with("CREATE DATABASE") {
            return create_once(&mut state.databases, "Database", sql, "CREATE DATABASE");
        }
        if sql.starts_with("CREATE PROJECT") {
            return create_once(&mut state.projects, "Project", sql, "CREATE PROJECT");
        }
        if sql.starts_with("CREATE MODEL") {
            return create_once(&mut state.models, "Model", sql, "CREATE MODEL");
        }
        if sql.starts_with("SELECT status") {
            return Ok(QueryResult::from_rows(vec![text_row(&[
                ("status", Value::String("complete".to_string())),
                ("error", Value::Null),
            ])]));
        }
        if sql.starts_with("SELECT") {
            let rows = match &state.prediction {
                Some((diagnosis, explanation)) => vec![text_row(&[
                    ("diagnosis", Value::String(diagnosis.clone())),
                    (
                        "diagnosis_explain",
                        explanation.clone().map(Value::String).unwrap_or(Value::Null),
                    ),
                ])],
                None => Vec::new(),
            };
            return Ok(QueryResult::from_rows(rows));
        }

        Ok(QueryResult::empty())
    }
}

/// Terminal that reaches end of input once its lines run out
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    notices: Vec<String>,
    results: Vec<PredictionResult>,
}

impl ScriptedTerminal {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            inputs: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn results(&self) -> &[PredictionResult] {
        &self.results
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

    fn show_header(&mut self) {}

    fn show_prediction(&mut self, result: &PredictionResult) {
        self.results.push(result.clone());
    }
}
