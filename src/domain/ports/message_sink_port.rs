//! Port definition for the outgoing message transport.

use async_trait::async_trait;

use crate::domain::entities::OutgoingMessage;
use crate::domain::errors::EmitError;

/// Port for sending messages back to the chat transport.
///
/// Each call is one independent outgoing message; calls are delivered in the
/// order they are made.
#[async_trait]
pub trait MessageSinkPort: Send + Sync {
    /// Sends one outgoing message.
    async fn send(&self, message: OutgoingMessage) -> Result<(), EmitError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashSet;

    use parking_lot::Mutex;

    /// A message observed by [`MockMessageSink`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentMessage {
        /// The submitted payload.
        pub message: OutgoingMessage,
        /// Whether an image attachment existed on disk when it was submitted.
        pub attachment_present: bool,
        /// Whether the sink accepted the payload.
        pub accepted: bool,
    }

    /// Recording sink that can be told to reject specific calls.
    #[derive(Default)]
    pub struct MockMessageSink {
        sent: Mutex<Vec<SentMessage>>,
        reject_calls: HashSet<usize>,
    }

    impl MockMessageSink {
        /// Creates sink accepting everything.
        pub fn new() -> Self {
            Self::default()
        }

        /// Rejects the call with the given zero-based index.
        pub fn rejecting_call(mut self, index: usize) -> Self {
            self.reject_calls.insert(index);
            self
        }

        /// Returns every submitted message, accepted or not.
        pub fn sent(&self) -> Vec<SentMessage> {
            self.sent.lock().clone()
        }

        /// Returns the text payloads that were submitted.
        pub fn texts(&self) -> Vec<String> {
            self.sent
                .lock()
                .iter()
                .filter_map(|s| match &s.message {
                    OutgoingMessage::Text(text) => Some(text.clone()),
                    OutgoingMessage::Image(_) => None,
                })
                .collect()
        }

        /// Returns the image payloads that were submitted.
        pub fn images(&self) -> Vec<std::path::PathBuf> {
            self.sent
                .lock()
                .iter()
                .filter_map(|s| match &s.message {
                    OutgoingMessage::Image(path) => Some(path.clone()),
                    OutgoingMessage::Text(_) => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl MessageSinkPort for MockMessageSink {
        async fn send(&self, message: OutgoingMessage) -> Result<(), EmitError> {
            let attachment_present = match &message {
                OutgoingMessage::Image(path) => path.exists(),
                OutgoingMessage::Text(_) => false,
            };

            let mut sent = self.sent.lock();
            let accepted = !self.reject_calls.contains(&sent.len());
            sent.push(SentMessage {
                message,
                attachment_present,
                accepted,
            });

            if accepted {
                Ok(())
            } else {
                Err(EmitError::rejected("scripted rejection"))
            }
        }
    }
}
