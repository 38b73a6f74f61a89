//! Error types for the connector shell
//!
//! Provides structured error types for repository, configuration and
//! interactive I/O failures.

use thiserror::Error;

/// Main error type for shell operations
#[derive(Error, Debug)]
pub enum ShellError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Repository or configuration parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Requested entity does not exist
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// No validator is registered for the entity's connector
    #[error("No validator registered for connector {0}")]
    UnknownConnector(i64),

    /// Reading operator input or writing to the terminal failed
    #[error("Interactive I/O failed: {0}")]
    Interactive(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ShellError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ShellError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        ShellError::FileError(msg.into())
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        ShellError::ParseError(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ShellError::InvalidInput(_)
                | ShellError::FileError(_)
                | ShellError::ParseError(_)
                | ShellError::NotFound { .. }
                | ShellError::UnknownConnector(_)
        )
    }
}

impl From<connector_validation::Error> for ShellError {
    fn from(err: connector_validation::Error) -> Self {
        match err {
            connector_validation::Error::UnknownConnector(id) => ShellError::UnknownConnector(id),
            other => ShellError::Interactive(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::ParseError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for ShellError {
    fn from(err: serde_yaml::Error) -> Self {
        ShellError::ParseError(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        ShellError::ParseError(format!("TOML error: {}", err))
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(err: toml::ser::Error) -> Self {
        ShellError::SerializationError(format!("TOML error: {}", err))
    }
}

/// Result type alias for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
