//! Startup sequence and session hand-off
//!
//! connect → list datasources → open store + schema → count rows →
//! datasource, project, model → session loop.
//!
//! The patient store is owned by [`run`] for the whole session and dropped on
//! every return path, so its connection is always released.

use crate::cli::Config;
use crate::display::Reporter;
use crate::errors::{AssistantError, Result};
use crate::prediction::PredictionGateway;
use crate::provisioning::ProvisioningController;
use crate::service::{connect, AnalyticsService, ModelRef};
use crate::session::{SessionLoop, SessionSummary, Terminal};
use crate::store::PatientStore;

/// Why the assistant stopped before reaching the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// MindsDB could not be reached
    NoConnection,
    /// Existing datasources could not be listed
    DataSourceListing,
    /// The `patients` table has no rows to train on
    EmptyStore,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Session ran until the operator stopped
    Completed(SessionSummary),
    /// Setup stopped early with a message already shown
    Aborted(AbortReason),
}

/// Connect to MindsDB, then run the assistant
pub async fn launch<T: Terminal + ?Sized>(
    config: &Config,
    terminal: &mut T,
    reporter: &Reporter,
) -> Result<RunOutcome> {
    let service = match connect(config, reporter).await {
        Ok(service) => service,
        Err(AssistantError::ConnectionFailure { attempts }) => {
            reporter.error(&format!(
                "Failed to connect to MindsDB at {} after {} attempts. Exiting.",
                config.service_url(),
                attempts
            ));
            return Ok(RunOutcome::Aborted(AbortReason::NoConnection));
        }
        Err(e) => return Err(e),
    };

    run(config, &service, terminal, reporter).await
}

/// Provision everything on an established connection and run the session
pub async fn run<S, T>(
    config: &Config,
    service: &S,
    terminal: &mut T,
    reporter: &Reporter,
) -> Result<RunOutcome>
where
    S: AnalyticsService + ?Sized,
    T: Terminal + ?Sized,
{
    let known_sources = match service.list_databases().await {
        Ok(names) => {
            reporter.debug(&format!("Existing databases: {:?}", names));
            names
        }
        Err(e) => {
            reporter.error(&format!("Error listing MindsDB datasources: {}", e));
            return Ok(RunOutcome::Aborted(AbortReason::DataSourceListing));
        }
    };

    let store = PatientStore::open_or_create(&config.store.path)?;
    reporter.success(&format!(
        "Connected to patient store '{}'",
        store.path().display()
    ));
    store.ensure_schema()?;

    let row_count = store.count_rows()?;
    reporter.info(&format!("Number of rows in 'patients' table: {}", row_count));
    if row_count == 0 {
        reporter.warning("'patients' table is empty. Please insert data before proceeding.");
        return Ok(RunOutcome::Aborted(AbortReason::EmptyStore));
    }

    let provisioning = &config.provisioning;
    let controller = ProvisioningController::new(provisioning.mode, *reporter);
    let model = ModelRef::from_config(provisioning);
    let db_file = store.absolute_path();

    controller
        .ensure_data_source(
            service,
            &known_sources,
            &provisioning.datasource,
            &db_file.to_string_lossy(),
        )
        .await?;
    controller.ensure_project(service, &provisioning.project).await?;
    controller.ensure_model(service, &model, provisioning).await?;

    reporter.success(&format!(
        "Model '{}' is ready for predictions",
        model.qualified()
    ));

    let gateway = PredictionGateway::new(model, *reporter);
    let summary = SessionLoop::new(service, &gateway).run(terminal).await?;

    store.close()?;
    Ok(RunOutcome::Completed(summary))
}
