//! Error types for the validation engine
//!
//! Semantic validation problems are never errors; they are reported as
//! messages. Only faults of the surrounding collaborators end up here.

use thiserror::Error;

/// Main error type for correction sessions and validator lookup
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing through the interactive collaborator failed
    #[error("I/O error during interactive edit: {0}")]
    Io(#[from] std::io::Error),

    /// The interactive collaborator failed for a reason other than I/O
    #[error("Interactive collaborator error: {0}")]
    Collaborator(String),

    /// No validator is registered for the connector
    #[error("No validator registered for connector {0}")]
    UnknownConnector(i64),
}

impl Error {
    /// Create a collaborator error
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Error::Collaborator(msg.into())
    }

    /// Check if this is an I/O fault of the interactive edit step
    pub fn is_io_fault(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Collaborator(_))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
