//! Idempotent provisioning of the remote datasource, project and model
//!
//! Every operation follows one policy: attempt the create; an "already
//! exists" rejection counts as success; any other failure is either reported
//! and tolerated (lenient) or returned as an error (strict).

use crate::cli::config::{ProvisioningConfig, ProvisioningMode};
use crate::display::Reporter;
use crate::errors::{AssistantError, Result};
use crate::service::{sql, AnalyticsService, ModelRef, ModelStatus};

/// Engine tag for the patient store integration
pub const DATASOURCE_ENGINE: &str = "sqlite";

/// What a provisioning step ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Resource was created by this call
    Created,
    /// Resource was already present
    AlreadyExists,
    /// Creation failed and lenient mode let it pass
    Failed(String),
}

/// Result of `ensure_model`, including the status lookup after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProvision {
    pub outcome: ProvisionOutcome,
    /// Status fetched after a successful create; `None` otherwise
    pub status: Option<ModelStatus>,
}

/// Applies the create-or-tolerate policy to each remote resource
#[derive(Debug, Clone, Copy)]
pub struct ProvisioningController {
    mode: ProvisioningMode,
    reporter: Reporter,
}

impl ProvisioningController {
    pub fn new(mode: ProvisioningMode, reporter: Reporter) -> Self {
        Self { mode, reporter }
    }

    /// Register `file_path` as a sqlite integration named `name`
    ///
    /// Skips the remote call when `name` is already in `known_sources`
    /// (exact, case-sensitive match).
    pub async fn ensure_data_source<S: AnalyticsService + ?Sized>(
        &self,
        service: &S,
        known_sources: &[String],
        name: &str,
        file_path: &str,
    ) -> Result<ProvisionOutcome> {
        if known_sources.iter().any(|known| known == name) {
            self.reporter
                .info(&format!("Datasource '{}' already registered", name));
            return Ok(ProvisionOutcome::AlreadyExists);
        }

        let result = service.create_database(name, DATASOURCE_ENGINE, file_path).await;
        let outcome = self.settle("datasource", name, result)?;
        if outcome == ProvisionOutcome::Created {
            self.reporter.success(&format!(
                "Registered '{}' as datasource '{}'",
                file_path, name
            ));
        }
        Ok(outcome)
    }

    /// Create the project namespace
    pub async fn ensure_project<S: AnalyticsService + ?Sized>(
        &self,
        service: &S,
        name: &str,
    ) -> Result<ProvisionOutcome> {
        let result = service.create_project(name).await;
        let outcome = self.settle("project", name, result)?;
        if outcome == ProvisionOutcome::Created {
            self.reporter.success(&format!("Project '{}' created", name));
        }
        Ok(outcome)
    }

    /// Train the prediction model over the datasource
    ///
    /// After a successful create the model status is fetched and reported.
    /// A status other than `complete` is only a warning: training runs in the
    /// background and callers must not assume the model is usable yet.
    pub async fn ensure_model<S: AnalyticsService + ?Sized>(
        &self,
        service: &S,
        model: &ModelRef,
        config: &ProvisioningConfig,
    ) -> Result<ModelProvision> {
        let statement = sql::create_model(
            model,
            &config.engine,
            &config.datasource,
            &config.training_query,
        );
        self.reporter.debug(&format!("Creating model:\n{}", statement));

        let result = service.query(&statement).await.map(|_| ());
        let outcome = self.settle("model", &model.qualified(), result)?;

        let status = if outcome == ProvisionOutcome::Created {
            self.reporter
                .success(&format!("Model '{}' created", model.qualified()));
            self.report_status(service, model).await
        } else {
            None
        };

        Ok(ModelProvision { outcome, status })
    }

    async fn report_status<S: AnalyticsService + ?Sized>(
        &self,
        service: &S,
        model: &ModelRef,
    ) -> Option<ModelStatus> {
        match service.model_status(model).await {
            Ok(status) => {
                self.reporter.info(&format!(
                    "Model '{}' status: {}",
                    model.model, status.status
                ));
                if !status.is_complete() {
                    let detail = status
                        .error
                        .as_deref()
                        .map(|e| format!(" ({})", e))
                        .unwrap_or_default();
                    self.reporter.warning(&format!(
                        "Model training not complete. Status: {}{}",
                        status.status, detail
                    ));
                }
                Some(status)
            }
            Err(e) => {
                self.reporter
                    .warning(&format!("Could not read status of '{}': {}", model.qualified(), e));
                None
            }
        }
    }

    /// Map a create result onto an outcome according to the mode
    fn settle(&self, resource: &str, name: &str, result: Result<()>) -> Result<ProvisionOutcome> {
        match result {
            Ok(()) => Ok(ProvisionOutcome::Created),
            Err(e) if e.is_already_exists() => {
                self.reporter
                    .info(&format!("{} '{}' already exists", capitalize(resource), name));
                Ok(ProvisionOutcome::AlreadyExists)
            }
            Err(e) => match self.mode {
                ProvisioningMode::Strict => Err(AssistantError::Provisioning {
                    resource: format!("{} '{}'", resource, name),
                    message: e.to_string(),
                }),
                ProvisioningMode::Lenient => {
                    self.reporter
                        .warning(&format!("Error creating {} '{}': {}", resource, name, e));
                    Ok(ProvisionOutcome::Failed(e.to_string()))
                }
            },
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeService;

    fn controller(mode: ProvisioningMode) -> ProvisioningController {
        ProvisioningController::new(mode, Reporter::quiet())
    }

    fn model() -> ModelRef {
        ModelRef::from_config(&ProvisioningConfig::default())
    }

    #[tokio::test]
    async fn test_data_source_skipped_when_known() {
        let service = FakeService::new();
        let known = vec!["mindsdb".to_string(), "health_data".to_string()];

        let outcome = controller(ProvisioningMode::Lenient)
            .ensure_data_source(&service, &known, "health_data", "/data/health_data.db")
            .await
            .unwrap();

        assert_eq!(outcome, ProvisionOutcome::AlreadyExists);
        assert!(service.statements().is_empty());
    }

    #[tokio::test]
    async fn test_data_source_name_match_is_case_sensitive() {
        let service = FakeService::new();
        let known = vec!["HEALTH_DATA".to_string()];

        let outcome = controller(ProvisioningMode::Lenient)
            .ensure_data_source(&service, &known, "health_data", "/data/health_data.db")
            .await
            .unwrap();

        assert_eq!(outcome, ProvisionOutcome::Created);
        assert_eq!(service.statements_starting_with("CREATE DATABASE").len(), 1);
    }

    #[tokio::test]
    async fn test_data_source_idempotent() {
        let service = FakeService::new();
        let ctl = controller(ProvisioningMode::Strict);

        let first = ctl
            .ensure_data_source(&service, &[], "health_data", "/data/health_data.db")
            .await
            .unwrap();
        let known = service.list_databases().await.unwrap();
        let second = ctl
            .ensure_data_source(&service, &known, "health_data", "/data/health_data.db")
            .await
            .unwrap();

        assert_eq!(first, ProvisionOutcome::Created);
        assert_eq!(second, ProvisionOutcome::AlreadyExists);
        assert_eq!(service.statements_starting_with("CREATE DATABASE").len(), 1);
    }

    #[tokio::test]
    async fn test_project_idempotent() {
        let service = FakeService::new();
        let ctl = controller(ProvisioningMode::Strict);

        assert_eq!(
            ctl.ensure_project(&service, "health_diagnosis").await.unwrap(),
            ProvisionOutcome::Created
        );
        assert_eq!(
            ctl.ensure_project(&service, "health_diagnosis").await.unwrap(),
            ProvisionOutcome::AlreadyExists
        );
    }

    #[tokio::test]
    async fn test_model_idempotent_and_status_fetched_once() {
        let service = FakeService::new().with_model_status("training");
        let ctl = controller(ProvisioningMode::Strict);
        let config = ProvisioningConfig::default();

        let first = ctl.ensure_model(&service, &model(), &config).await.unwrap();
        assert_eq!(first.outcome, ProvisionOutcome::Created);
        assert_eq!(first.status.as_ref().map(|s| s.status.as_str()), Some("training"));

        let second = ctl.ensure_model(&service, &model(), &config).await.unwrap();
        assert_eq!(second.outcome, ProvisionOutcome::AlreadyExists);
        assert!(second.status.is_none());

        assert_eq!(service.statements_starting_with("SELECT status").len(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_status_is_not_an_error() {
        let service = FakeService::new().with_model_status("error");
        let ctl = controller(ProvisioningMode::Strict);

        let provision = ctl
            .ensure_model(&service, &model(), &ProvisioningConfig::default())
            .await
            .unwrap();
        assert_eq!(provision.outcome, ProvisionOutcome::Created);
        assert!(provision.status.unwrap().is_error());
    }

    #[tokio::test]
    async fn test_lenient_mode_tolerates_other_errors() {
        let service = FakeService::new().failing_on("CREATE PROJECT", "permission denied");

        let outcome = controller(ProvisioningMode::Lenient)
            .ensure_project(&service, "health_diagnosis")
            .await
            .unwrap();

        match outcome {
            ProvisionOutcome::Failed(message) => assert!(message.contains("permission denied")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_strict_mode_escalates_other_errors() {
        let service = FakeService::new().failing_on("CREATE MODEL", "engine not found");

        let result = controller(ProvisioningMode::Strict)
            .ensure_model(&service, &model(), &ProvisioningConfig::default())
            .await;

        match result {
            Err(AssistantError::Provisioning { resource, message }) => {
                assert!(resource.contains("health_diagnosis.diagnosis_predictor"));
                assert!(message.contains("engine not found"));
            }
            other => panic!("expected Provisioning error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_strict_mode_still_accepts_already_exists() {
        let service = FakeService::new().failing_on("CREATE PROJECT", "Project already exists");

        let outcome = controller(ProvisioningMode::Strict)
            .ensure_project(&service, "health_diagnosis")
            .await
            .unwrap();
        assert_eq!(outcome, ProvisionOutcome::AlreadyExists);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("model"), "Model");
        assert_eq!(capitalize(""), "");
    }
}
