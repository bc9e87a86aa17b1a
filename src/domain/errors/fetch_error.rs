//! Image fetch error types.

use thiserror::Error;

/// Reasons a single image could not be fetched and staged.
///
/// A fetch error only ever affects the URL it was raised for.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to stage {url} at {path}: {message}")]
    Io {
        url: String,
        path: String,
        message: String,
    },

    #[error("invalid image URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    /// Creates status error.
    #[must_use]
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates timeout error.
    #[must_use]
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates staging I/O error.
    #[must_use]
    pub fn io(
        url: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Io {
            url: url.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns the URL the error belongs to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::Io { url, .. }
            | Self::InvalidUrl { url, .. } => url,
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}
