//! Outgoing message emission error types.

use thiserror::Error;

/// The sink refused or failed to deliver one outgoing payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum EmitError {
    #[error("message rejected by transport: {message}")]
    Rejected { message: String },

    #[error("attachment not found: {path}")]
    MissingAttachment { path: String },

    #[error("io error while emitting: {message}")]
    Io { message: String },
}

impl EmitError {
    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates missing attachment error.
    #[must_use]
    pub fn missing_attachment(path: impl Into<String>) -> Self {
        Self::MissingAttachment { path: path.into() }
    }

    /// Creates io error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}
