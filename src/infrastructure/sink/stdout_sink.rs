//! Sink that prints outgoing messages to standard output.

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use crate::domain::entities::OutgoingMessage;
use crate::domain::errors::EmitError;
use crate::domain::ports::MessageSinkPort;

/// Prints text messages verbatim and image attachments as `[image] <path>`.
pub struct StdoutSink {
    out: Mutex<Stdout>,
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StdoutSink {
    /// Creates new sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
        }
    }

    fn render(message: &OutgoingMessage) -> String {
        match message {
            OutgoingMessage::Text(text) => format!("{text}\n"),
            OutgoingMessage::Image(path) => format!("[image] {}\n", path.display()),
        }
    }
}

#[async_trait]
impl MessageSinkPort for StdoutSink {
    async fn send(&self, message: OutgoingMessage) -> Result<(), EmitError> {
        let rendered = Self::render(&message);
        let mut out = self.out.lock().await;
        out.write_all(rendered.as_bytes())
            .await
            .map_err(|e| EmitError::io(e.to_string()))?;
        out.flush().await.map_err(|e| EmitError::io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(StdoutSink::render(&OutgoingMessage::text("hi")), "hi\n");
        assert_eq!(
            StdoutSink::render(&OutgoingMessage::image("/tmp/a.png")),
            "[image] /tmp/a.png\n"
        );
    }
}
