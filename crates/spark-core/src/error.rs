//! Error types for the Spark application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Spark application.
///
/// Collaborator failures travel back through the action channel, so the type
/// is `Clone` and carries messages rather than source errors.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SparkError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text generation collaborator failed
    #[error("Generation error: {message}")]
    Generation {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// Prompt template could not be rendered
    #[error("Template error: {0}")]
    Template(String),

    /// The request was cancelled before it completed
    #[error("Request cancelled")]
    Cancelled,
}

impl SparkError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Generation error without an HTTP status
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            status_code: None,
            message: message.into(),
            is_retryable: false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SparkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SparkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SparkError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SparkError>`.
pub type Result<T> = std::result::Result<T, SparkError>;
