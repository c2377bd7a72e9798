//! Configuration management for the diagnosis assistant
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.diagnosis-assistant/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::errors::{AssistantError, Result};

/// Complete configuration for the diagnosis assistant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub provisioning: ProvisioningConfig,
}

/// MindsDB connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub connect_attempts: u32,
    pub retry_delay_secs: u64,
    /// Per-request HTTP timeout for every MindsDB call, handshake included.
    /// Applies on top of the connect retry budget.
    pub request_timeout_secs: u64,
}

/// Local patient store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

/// Remote resources the assistant provisions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    pub datasource: String,
    pub project: String,
    pub model: String,
    pub target: String,
    pub engine: String,
    pub training_query: String,
    pub mode: ProvisioningMode,
}

/// How provisioning errors other than "already exists" are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisioningMode {
    /// Abort on any provisioning error
    Strict,
    /// Report the error and keep going
    #[default]
    Lenient,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 47334,
            connect_attempts: 3,
            retry_delay_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("health_data.db"),
        }
    }
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            datasource: "health_data".to_string(),
            project: "health_diagnosis".to_string(),
            model: "diagnosis_predictor".to_string(),
            target: "diagnosis".to_string(),
            engine: "mindsdb".to_string(),
            training_query: "SELECT * FROM patients".to_string(),
            mode: ProvisioningMode::Lenient,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AssistantError::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| AssistantError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".diagnosis-assistant").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.service.host.trim().is_empty() {
            return Err(AssistantError::Config("service.host must not be empty".to_string()));
        }

        if self.service.connect_attempts == 0 {
            return Err(AssistantError::Config(
                "service.connect_attempts must be greater than 0".to_string()
            ));
        }

        if self.store.path.as_os_str().is_empty() {
            return Err(AssistantError::Config("store.path must not be empty".to_string()));
        }

        let names = [
            ("provisioning.datasource", &self.provisioning.datasource),
            ("provisioning.project", &self.provisioning.project),
            ("provisioning.model", &self.provisioning.model),
            ("provisioning.target", &self.provisioning.target),
            ("provisioning.engine", &self.provisioning.engine),
        ];
        for (field, value) in names {
            if !is_identifier(value) {
                return Err(AssistantError::Config(
                    format!("{} must be a plain identifier, got '{}'", field, value)
                ));
            }
        }

        if self.provisioning.training_query.trim().is_empty() {
            return Err(AssistantError::Config(
                "provisioning.training_query must not be empty".to_string()
            ));
        }

        Ok(())
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AssistantError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Get MindsDB base URL
    pub fn service_url(&self) -> String {
        format!("http://{}:{}", self.service.host, self.service.port)
    }

    /// Delay between connection attempts
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.service.retry_delay_secs)
    }

    /// HTTP request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.service.request_timeout_secs)
    }
}

/// Names are spliced into statements unquoted, so only identifiers are allowed
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
