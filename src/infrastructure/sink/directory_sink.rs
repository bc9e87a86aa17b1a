//! Sink that delivers outgoing messages into a local directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::entities::OutgoingMessage;
use crate::domain::errors::EmitError;
use crate::domain::ports::MessageSinkPort;

/// Transcript file name inside the output directory.
pub const TRANSCRIPT_FILE_NAME: &str = "messages.jsonl";

/// One line of the delivery transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Position in submission order, starting at 1.
    pub sequence: usize,
    /// Delivery time.
    pub delivered_at: DateTime<Utc>,
    /// The delivered message. Image paths point at the delivered copy.
    pub message: OutgoingMessage,
}

/// Writes each message as a numbered file and appends it to a JSON lines
/// transcript.
///
/// Attachments are copied, so the staged original can be deleted right after
/// sending.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    sequence: Mutex<usize>,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`, creating it if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self, EmitError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| EmitError::io(format!("failed to create {}: {e}", dir.display())))?;

        Ok(Self {
            dir,
            sequence: Mutex::new(0),
        })
    }

    /// Returns the output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the transcript path.
    #[must_use]
    pub fn transcript_path(&self) -> PathBuf {
        self.dir.join(TRANSCRIPT_FILE_NAME)
    }

    /// Reads back every transcript entry.
    ///
    /// # Errors
    /// Returns error if the transcript cannot be read or parsed.
    pub async fn transcript(&self) -> Result<Vec<TranscriptEntry>, EmitError> {
        let content = match fs::read_to_string(self.transcript_path()).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(EmitError::io(e.to_string())),
        };

        content
            .lines()
            .map(|line| serde_json::from_str(line).map_err(|e| EmitError::io(e.to_string())))
            .collect()
    }

    async fn deliver(
        &self,
        sequence: usize,
        message: OutgoingMessage,
    ) -> Result<OutgoingMessage, EmitError> {
        match message {
            OutgoingMessage::Text(text) => {
                let target = self.dir.join(format!("{sequence:04}.txt"));
                fs::write(&target, text.as_bytes())
                    .await
                    .map_err(|e| EmitError::io(e.to_string()))?;
                Ok(OutgoingMessage::Text(text))
            }
            OutgoingMessage::Image(source) => {
                if !fs::try_exists(&source).await.unwrap_or(false) {
                    return Err(EmitError::missing_attachment(source.display().to_string()));
                }
                let extension = source
                    .extension()
                    .map_or_else(|| "img".to_string(), |ext| ext.to_string_lossy().into_owned());
                let target = self.dir.join(format!("{sequence:04}.{extension}"));
                fs::copy(&source, &target)
                    .await
                    .map_err(|e| EmitError::io(e.to_string()))?;
                Ok(OutgoingMessage::Image(target))
            }
        }
    }

    async fn append_transcript(&self, entry: &TranscriptEntry) -> Result<(), EmitError> {
        let mut line = serde_json::to_string(entry).map_err(|e| EmitError::io(e.to_string()))?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.transcript_path())
            .await
            .map_err(|e| EmitError::io(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| EmitError::io(e.to_string()))?;
        file.flush().await.map_err(|e| EmitError::io(e.to_string()))
    }
}

#[async_trait]
impl MessageSinkPort for DirectorySink {
    async fn send(&self, message: OutgoingMessage) -> Result<(), EmitError> {
        // Held for the whole delivery so numbering matches transcript order.
        let mut sequence = self.sequence.lock().await;
        let next = *sequence + 1;

        let delivered = self.deliver(next, message).await?;
        let entry = TranscriptEntry {
            sequence: next,
            delivered_at: Utc::now(),
            message: delivered,
        };
        self.append_transcript(&entry).await?;
        *sequence = next;

        debug!(sequence = next, image = entry.message.is_image(), "Message delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_text_and_image_are_numbered_in_order() {
        let out = tempdir().unwrap();
        let staging = tempdir().unwrap();
        let staged = staging.path().join("abc.png");
        std::fs::write(&staged, b"img").unwrap();

        let sink = DirectorySink::create(out.path()).await.unwrap();
        sink.send(OutgoingMessage::text("hello")).await.unwrap();
        sink.send(OutgoingMessage::image(&staged)).await.unwrap();

        assert_eq!(std::fs::read_to_string(out.path().join("0001.txt")).unwrap(), "hello");
        assert_eq!(std::fs::read(out.path().join("0002.png")).unwrap(), b"img");

        let transcript = sink.transcript().await.unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].message, OutgoingMessage::text("hello"));
        assert_eq!(
            transcript[1].message,
            OutgoingMessage::image(out.path().join("0002.png"))
        );
    }

    #[tokio::test]
    async fn test_copied_attachment_survives_staged_removal() {
        let out = tempdir().unwrap();
        let staging = tempdir().unwrap();
        let staged = staging.path().join("x.gif");
        std::fs::write(&staged, b"gif").unwrap();

        let sink = DirectorySink::create(out.path()).await.unwrap();
        sink.send(OutgoingMessage::image(&staged)).await.unwrap();
        std::fs::remove_file(&staged).unwrap();

        assert!(out.path().join("0001.gif").exists());
    }

    #[tokio::test]
    async fn test_missing_attachment_is_rejected_without_consuming_sequence() {
        let out = tempdir().unwrap();
        let sink = DirectorySink::create(out.path().join("nested")).await.unwrap();

        let result = sink
            .send(OutgoingMessage::image(out.path().join("missing.png")))
            .await;
        assert!(matches!(result, Err(EmitError::MissingAttachment { .. })));

        sink.send(OutgoingMessage::text("after")).await.unwrap();
        assert!(sink.dir().join("0001.txt").exists());
        assert_eq!(sink.transcript().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_transcript() {
        let out = tempdir().unwrap();
        let sink = DirectorySink::create(out.path()).await.unwrap();
        assert!(sink.transcript().await.unwrap().is_empty());
    }
}
