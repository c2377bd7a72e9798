//! Error types for the diagnosis assistant
//!
//! Classifies every failure the assistant can hit so the entry point can
//! decide between aborting with a readable message, degrading to a warning,
//! or surfacing the full error chain.

use thiserror::Error;

/// Main error type for the diagnosis assistant
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Remote service unreachable after the retry budget was spent
    #[error("No connection available: MindsDB unreachable after {attempts} attempts")]
    ConnectionFailure { attempts: u32 },

    /// Local store file or table errors
    #[error("Storage error: {0}")]
    StorageFailure(String),

    /// Provisioning failure escalated in strict mode
    #[error("Provisioning of {resource} failed: {message}")]
    Provisioning { resource: String, message: String },

    /// Error reported by the remote service (carries its message text)
    #[error("MindsDB error: {0}")]
    Service(String),

    /// Session state machine transition errors
    #[error("Invalid state transition from {from:?} to {to:?}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unclassified errors
    #[error("Unexpected error: {0}")]
    Generic(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

impl AssistantError {
    /// Whether the remote service rejected a create because the resource exists
    pub fn is_already_exists(&self) -> bool {
        match self {
            AssistantError::Service(message) => {
                message.to_lowercase().contains("already exists")
            }
            _ => false,
        }
    }

    /// Whether this error belongs to a known category with a prepared message
    pub fn is_classified(&self) -> bool {
        !matches!(self, AssistantError::Generic(_))
    }
}

impl From<rusqlite::Error> for AssistantError {
    fn from(err: rusqlite::Error) -> Self {
        AssistantError::StorageFailure(err.to_string())
    }
}

/// Convert anyhow errors to AssistantError
impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Generic(format!("{:?}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failure_display() {
        let err = AssistantError::ConnectionFailure { attempts: 3 };
        assert!(err.to_string().contains("No connection available"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_already_exists_detection() {
        let err = AssistantError::Service("Project already exists: health_diagnosis".to_string());
        assert!(err.is_already_exists());

        let err = AssistantError::Service("Database 'health_data' Already Exists".to_string());
        assert!(err.is_already_exists());

        let err = AssistantError::Service("Syntax error near PREDICT".to_string());
        assert!(!err.is_already_exists());
    }

    #[test]
    fn test_already_exists_only_for_service_errors() {
        let err = AssistantError::StorageFailure("table already exists".to_string());
        assert!(!err.is_already_exists());
    }

    #[test]
    fn test_rusqlite_conversion() {
        let err: AssistantError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, AssistantError::StorageFailure(_)));
    }

    #[test]
    fn test_classification() {
        assert!(AssistantError::Config("bad".to_string()).is_classified());
        assert!(!AssistantError::Generic("boom".to_string()).is_classified());
    }
}
