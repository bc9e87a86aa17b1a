//! Inbound and outgoing message types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A message handed to the relay by the host before delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    text: String,
    origin: Option<String>,
}

impl InboundMessage {
    /// Creates a message from its text payload.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: None,
        }
    }

    /// Tags the message with the session or conversation it belongs to.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Returns the text payload.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the origin tag, if any.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

/// A single payload submitted to the outgoing sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum OutgoingMessage {
    /// Plain text message.
    Text(String),
    /// Image attachment backed by a local file.
    Image(PathBuf),
}

impl OutgoingMessage {
    /// Creates a plain text message.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates an image attachment message.
    #[must_use]
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::Image(path.into())
    }

    /// Returns true for image attachments.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}
