//! Connection establishment with bounded fixed-delay retry
//!
//! - Attempts: `service.connect_attempts` (3 by default)
//! - Delay: constant `service.retry_delay_secs` between attempts, none after the last
//! - No exponential growth, no jitter

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::cli::Config;
use crate::display::Reporter;
use crate::errors::{AssistantError, Result};
use crate::service::client::MindsDbClient;

/// Fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.service.connect_attempts, config.retry_delay())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }
}

/// Run `operation` until it succeeds or the policy's attempts are spent
///
/// Returns `ConnectionFailure` once every attempt has failed.
pub async fn retry_fixed<F, Fut, T>(
    policy: &RetryPolicy,
    reporter: &Reporter,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for attempt in 1..=policy.attempts {
        reporter.info(&format!(
            "Attempting to connect to MindsDB (attempt {}/{})...",
            attempt, policy.attempts
        ));

        match operation().await {
            Ok(value) => {
                reporter.success("Connected successfully to MindsDB");
                return Ok(value);
            }
            Err(e) => {
                reporter.warning(&format!("Failed to connect to MindsDB: {}", e));
                if attempt < policy.attempts {
                    reporter.info(&format!("Retrying in {} seconds...", policy.delay.as_secs()));
                    sleep(policy.delay).await;
                }
            }
        }
    }

    Err(AssistantError::ConnectionFailure {
        attempts: policy.attempts,
    })
}

/// Connect to the configured MindsDB instance
pub async fn connect(config: &Config, reporter: &Reporter) -> Result<MindsDbClient> {
    let client = MindsDbClient::with_config(&config.service_url(), config.request_timeout(), *reporter)?;
    let policy = RetryPolicy::from_config(config);

    retry_fixed(&policy, reporter, || client.check_status()).await?;
    Ok(client)
}
