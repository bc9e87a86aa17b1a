//! Staging area error types.

use thiserror::Error;

/// Failures creating or cleaning the staging area.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StagingError {
    #[error("failed to create staging area under {parent}: {message}")]
    Create { parent: String, message: String },

    #[error("failed to clean up {path}: {message}")]
    Cleanup { path: String, message: String },
}

impl StagingError {
    /// Creates creation error.
    #[must_use]
    pub fn create(parent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Create {
            parent: parent.into(),
            message: message.into(),
        }
    }

    /// Creates cleanup error.
    #[must_use]
    pub fn cleanup(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Cleanup {
            path: path.into(),
            message: message.into(),
        }
    }
}
