//! Markdown image processing use case.

use std::path::Path;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use crate::application::dto::{ProcessOutcome, ProcessReport};
use crate::application::services::{ReferenceExtractor, TextRewriter};
use crate::domain::entities::{
    ImageReference, InboundMessage, OutgoingMessage, ProcessingResult, StagedImage,
};
use crate::domain::ports::{ImageFetcherPort, MessageSinkPort};

/// Runs one processing cycle: extract, fetch, rewrite, emit, clean.
///
/// Stateless across cycles; the staging directory is supplied per call so
/// several cycles can share it.
pub struct ProcessMessageUseCase {
    fetcher: Arc<dyn ImageFetcherPort>,
    rewriter: TextRewriter,
    max_concurrent_fetches: usize,
}

impl ProcessMessageUseCase {
    /// Creates a use case that fetches images one after another.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetcherPort>, rewriter: TextRewriter) -> Self {
        Self {
            fetcher,
            rewriter,
            max_concurrent_fetches: 1,
        }
    }

    /// Allows up to `limit` fetches of the same message in flight.
    /// Emission order stays the extraction order.
    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// Processes `message`, sending the result through `sink`.
    ///
    /// Returns [`ProcessOutcome::Passthrough`] without touching the sink when
    /// the message holds no image references. Fetch, emission and cleanup
    /// failures are logged and never abort the cycle.
    pub async fn execute(
        &self,
        message: &InboundMessage,
        staging_dir: &Path,
        sink: &dyn MessageSinkPort,
    ) -> ProcessOutcome {
        if !ReferenceExtractor::contains_images(message.text()) {
            debug!("No Markdown images found, passing message through");
            return ProcessOutcome::Passthrough;
        }

        let references = ReferenceExtractor::extract(message.text());

        info!(
            origin = message.origin().unwrap_or("-"),
            count = references.len(),
            "Detected Markdown images, processing message"
        );

        let result = self.prepare(message.text(), &references, staging_dir).await;

        let mut report = ProcessReport {
            text: result.text.clone(),
            references: references.len(),
            processed: result.processed_count(),
            failed_urls: result.failed_urls.clone(),
            ..ProcessReport::default()
        };

        Self::emit(&result, sink, &mut report).await;
        report.cleanup_failures = Self::cleanup(&result.images).await;

        info!(
            processed = report.processed,
            failed = report.failed_urls.len(),
            emitted = report.images_emitted,
            "Finished processing message"
        );

        ProcessOutcome::Processed(report)
    }

    /// Fetches every reference and rewrites the text.
    ///
    /// The notice count in the returned text equals the number of staged
    /// images, not the number of references.
    pub async fn prepare(
        &self,
        text: &str,
        references: &[ImageReference],
        staging_dir: &Path,
    ) -> ProcessingResult {
        let fetcher = &self.fetcher;
        let outcomes: Vec<_> = stream::iter(references)
            .map(move |reference| async move {
                (reference, fetcher.fetch(reference, staging_dir).await)
            })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await;

        let mut images = Vec::with_capacity(outcomes.len());
        let mut failed_urls = Vec::new();

        for (reference, outcome) in outcomes {
            match outcome {
                Ok(staged) => {
                    info!(
                        url = %reference,
                        path = %staged.path().display(),
                        size = staged.size(),
                        "Image downloaded"
                    );
                    images.push(staged);
                }
                Err(e) => {
                    if e.is_network_error() {
                        error!(url = %reference, error = %e, "Error while downloading image");
                    } else {
                        warn!(url = %reference, error = %e, "Failed to download image");
                    }
                    failed_urls.push(e.url().to_string());
                }
            }
        }

        ProcessingResult {
            text: self.rewriter.rewrite(text, images.len()),
            images,
            failed_urls,
        }
    }

    async fn emit(
        result: &ProcessingResult,
        sink: &dyn MessageSinkPort,
        report: &mut ProcessReport,
    ) {
        match sink.send(OutgoingMessage::text(result.text.clone())).await {
            Ok(()) => report.text_emitted = true,
            Err(e) => error!(error = %e, "Failed to send rewritten text"),
        }

        for image in &result.images {
            if !tokio::fs::try_exists(image.path()).await.unwrap_or(false) {
                warn!(path = %image.path().display(), "Staged image missing, skipping");
                continue;
            }

            match sink.send(OutgoingMessage::image(image.path())).await {
                Ok(()) => {
                    report.images_emitted += 1;
                    info!(path = %image.path().display(), "Image sent");
                }
                Err(e) => {
                    error!(path = %image.path().display(), error = %e, "Failed to send image");
                }
            }
        }
    }

    /// Removes staged files, returning how many could not be removed.
    async fn cleanup(images: &[StagedImage]) -> usize {
        let mut failures = 0;

        for image in images {
            match tokio::fs::remove_file(image.path()).await {
                Ok(()) => debug!(path = %image.path().display(), "Removed staged image"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %image.path().display(), "Staged image already gone");
                }
                Err(e) => {
                    failures += 1;
                    warn!(
                        path = %image.path().display(),
                        error = %e,
                        "Failed to remove staged image"
                    );
                }
            }
        }

        failures
    }
}
