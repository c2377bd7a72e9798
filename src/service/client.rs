//! MindsDB HTTP client
//!
//! Talks to the HTTP API of a local MindsDB instance:
//! - `GET /api/status` as the connection handshake
//! - `POST /api/sql/query` for every statement

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::display::Reporter;
use crate::errors::{AssistantError, Result};
use crate::service::types::{QueryResponse, QueryResult};
use crate::service::AnalyticsService;

/// MindsDB SQL API client
#[derive(Debug, Clone)]
pub struct MindsDbClient {
    client: Client,
    base_url: String,
    reporter: Reporter,
}

#[derive(Debug, Serialize)]
struct SqlQueryRequest<'a> {
    query: &'a str,
}

impl MindsDbClient {
    /// Create client for `base_url`
    ///
    /// `timeout` bounds every request, including the status handshake.
    pub fn with_config(base_url: &str, timeout: Duration, reporter: Reporter) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AssistantError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            reporter,
        })
    }

    /// Check that the server answers its status endpoint
    pub async fn check_status(&self) -> Result<()> {
        let url = format!("{}/api/status", self.base_url);
        self.reporter.trace(&format!("GET {}", url));

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AssistantError::Service(format!(
                "Status endpoint returned HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AnalyticsService for MindsDbClient {
    async fn query(&self, sql: &str) -> Result<QueryResult> {
        let url = format!("{}/api/sql/query", self.base_url);
        self.reporter.trace(&format!("POST {}: {}", url, sql));

        let response = self
            .client
            .post(&url)
            .json(&SqlQueryRequest { query: sql })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        self.reporter.trace(&format!("HTTP {}: {}", status, body));

        // Error responses carry the same JSON body as successful ones
        match serde_json::from_str::<QueryResponse>(&body) {
            Ok(parsed) => parsed.into_result(),
            Err(_) if !status.is_success() => Err(AssistantError::Service(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            ))),
            Err(e) => Err(AssistantError::Serialization(e)),
        }
    }
}
