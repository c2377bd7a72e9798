//! Doctor command for setup diagnostics
//!
//! Checks the pieces the assistant depends on without changing any of them:
//! MindsDB reachability, the patient store, the datasource registration and
//! the model's training status.

use colored::*;
use std::path::Path;

use crate::cli::Config;
use crate::display::Reporter;
use crate::service::{AnalyticsService, MindsDbClient, ModelRef};
use crate::store::PatientStore;

/// Rows inspected by the sample check
const SAMPLE_SIZE: usize = 20;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    pub detail: String,
}

impl HealthCheck {
    fn pass(name: &str, detail: impl Into<String>) -> Self {
        Self { name: name.to_string(), status: HealthStatus::Pass, detail: detail.into() }
    }

    fn warn(name: &str, message: impl Into<String>) -> Self {
        Self { name: name.to_string(), status: HealthStatus::Warn(message.into()), detail: String::new() }
    }

    fn fail(name: &str, message: impl Into<String>) -> Self {
        Self { name: name.to_string(), status: HealthStatus::Fail(message.into()), detail: String::new() }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
}

impl Doctor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks against the configured MindsDB
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = vec![self.check_store(), self.check_samples()];

        let client = match MindsDbClient::with_config(
            &self.config.service_url(),
            self.config.request_timeout(),
            Reporter::quiet(),
        ) {
            Ok(client) => client,
            Err(e) => {
                checks.insert(0, HealthCheck::fail("MindsDB API", e.to_string()));
                return checks;
            }
        };

        match client.check_status().await {
            Ok(()) => {
                checks.insert(0, HealthCheck::pass("MindsDB API", self.config.service_url()));
                checks.extend(self.remote_checks(&client).await);
            }
            Err(e) => {
                checks.insert(0, HealthCheck::fail("MindsDB API", format!("not reachable: {}", e)));
            }
        }

        checks
    }

    /// Checks that need a reachable service
    pub async fn remote_checks<S: AnalyticsService + ?Sized>(&self, service: &S) -> Vec<HealthCheck> {
        vec![
            self.check_datasource(service).await,
            self.check_model(service).await,
        ]
    }

    /// Store file present, table readable and non-empty
    pub fn check_store(&self) -> HealthCheck {
        const NAME: &str = "Patient Store";
        let path: &Path = &self.config.store.path;

        // Opening would create a missing file; report it instead
        if !path.exists() {
            return HealthCheck::fail(NAME, format!("{} does not exist", path.display()));
        }

        let store = match PatientStore::open_or_create(path) {
            Ok(store) => store,
            Err(e) => return HealthCheck::fail(NAME, e.to_string()),
        };

        match store.count_rows() {
            Ok(0) => HealthCheck::fail(NAME, "'patients' table is empty"),
            Ok(count) => HealthCheck::pass(NAME, format!("{} patient rows", count)),
            Err(e) => HealthCheck::fail(NAME, format!("cannot read 'patients': {}", e)),
        }
    }

    /// Recent rows carry a diagnosis and a usable gender
    pub fn check_samples(&self) -> HealthCheck {
        const NAME: &str = "Training Rows";
        let path: &Path = &self.config.store.path;

        if !path.exists() {
            return HealthCheck::warn(NAME, "no store to sample");
        }

        let records = match PatientStore::open_or_create(path).and_then(|s| s.recent_records(SAMPLE_SIZE)) {
            Ok(records) => records,
            Err(e) => return HealthCheck::warn(NAME, format!("cannot sample rows: {}", e)),
        };
        if records.is_empty() {
            return HealthCheck::warn(NAME, "no rows to sample");
        }

        let unlabelled = records.iter().filter(|r| !r.is_labelled()).count();
        let bad_gender = records.iter().filter(|r| r.parsed_gender().is_none()).count();

        if unlabelled == records.len() {
            HealthCheck::fail(NAME, format!("none of the last {} rows has a diagnosis", records.len()))
        } else if unlabelled > 0 || bad_gender > 0 {
            HealthCheck::warn(
                NAME,
                format!(
                    "last {} rows: {} without diagnosis, {} with unreadable gender",
                    records.len(),
                    unlabelled,
                    bad_gender
                ),
            )
        } else {
            HealthCheck::pass(NAME, format!("last {} rows look usable", records.len()))
        }
    }

    async fn check_datasource<S: AnalyticsService + ?Sized>(&self, service: &S) -> HealthCheck {
        const NAME: &str = "Datasource";
        let name = &self.config.provisioning.datasource;

        match service.list_databases().await {
            Ok(names) if names.iter().any(|n| n == name) => HealthCheck::pass(NAME, name.clone()),
            Ok(_) => HealthCheck::warn(NAME, format!("'{}' not registered yet", name)),
            Err(e) => HealthCheck::fail(NAME, format!("cannot list datasources: {}", e)),
        }
    }

    async fn check_model<S: AnalyticsService + ?Sized>(&self, service: &S) -> HealthCheck {
        const NAME: &str = "Model";
        let model = ModelRef::from_config(&self.config.provisioning);

        match service.model_status(&model).await {
            Ok(status) if status.is_complete() => HealthCheck::pass(NAME, model.qualified()),
            Ok(status) if status.is_error() => HealthCheck::fail(
                NAME,
                format!("training failed: {}", status.error.unwrap_or_default()),
            ),
            Ok(status) => HealthCheck::warn(NAME, format!("status '{}'", status.status)),
            Err(e) => HealthCheck::warn(NAME, format!("{} not available: {}", model.qualified(), e)),
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "Diagnosis Assistant Diagnostics".bold().cyan());
        println!("{:<20} {}", "Check", "Status");
        println!("{}", "=".repeat(50));

        for check in checks {
            let message = match &check.status {
                HealthStatus::Pass => format!("{} {}", "PASS".green(), check.detail.dimmed()),
                HealthStatus::Warn(msg) => format!("{} {}", "WARN:".yellow(), msg),
                HealthStatus::Fail(msg) => format!("{} {}", "FAIL:".red(), msg),
            };
            println!("{:<20} {}", check.name, message);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
