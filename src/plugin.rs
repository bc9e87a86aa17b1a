//! Relay plugin lifecycle: staging area creation, per-message processing and
//! shutdown cleanup.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::dto::ProcessOutcome;
use crate::application::services::TextRewriter;
use crate::application::use_cases::ProcessMessageUseCase;
use crate::domain::entities::InboundMessage;
use crate::domain::errors::StagingError;
use crate::domain::ports::{ImageFetcherPort, MessageSinkPort};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::image::{HttpClientError, HttpImageFetcher};
use crate::infrastructure::staging::StagingArea;

/// Plugin start-up failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PluginError {
    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error(transparent)]
    HttpClient(#[from] HttpClientError),
}

/// The Markdown image relay as seen by a host framework.
///
/// Owns the staging area for its whole lifetime; every processing cycle
/// shares it.
pub struct ImageRelayPlugin {
    staging: StagingArea,
    use_case: ProcessMessageUseCase,
}

impl ImageRelayPlugin {
    /// Starts the plugin with the HTTP fetcher.
    ///
    /// # Errors
    /// Returns error if the staging area or HTTP client cannot be created.
    pub fn start(config: &AppConfig) -> Result<Self, PluginError> {
        let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch)?);
        Self::start_with_fetcher(config, fetcher).map_err(PluginError::from)
    }

    /// Starts the plugin with a custom fetcher.
    ///
    /// # Errors
    /// Returns error if the staging area cannot be created.
    pub fn start_with_fetcher(
        config: &AppConfig,
        fetcher: Arc<dyn ImageFetcherPort>,
    ) -> Result<Self, StagingError> {
        let staging = StagingArea::create(
            config.staging.parent_dir.as_deref(),
            &config.staging.prefix,
        )?;

        let use_case =
            ProcessMessageUseCase::new(fetcher, TextRewriter::new(&config.rewrite.notice_template))
                .with_max_concurrent_fetches(config.fetch.max_concurrent_fetches);

        info!(
            staging = %staging.path().display(),
            max_concurrent_fetches = config.fetch.max_concurrent_fetches,
            "Markdown image relay started"
        );

        Ok(Self { staging, use_case })
    }

    /// Returns the staging directory.
    #[must_use]
    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    /// Runs one processing cycle for `message`.
    pub async fn handle(
        &self,
        message: &InboundMessage,
        sink: &dyn MessageSinkPort,
    ) -> ProcessOutcome {
        self.use_case
            .execute(message, self.staging.path(), sink)
            .await
    }

    /// Runs one processing cycle, abandoning it if `shutdown` completes first.
    ///
    /// Returns `None` when the cycle was abandoned. Whatever it had staged is
    /// left for [`ImageRelayPlugin::stop`] to remove.
    pub async fn handle_until<F>(
        &self,
        message: &InboundMessage,
        sink: &dyn MessageSinkPort,
        shutdown: F,
    ) -> Option<ProcessOutcome>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            outcome = self.handle(message, sink) => Some(outcome),
            () = shutdown => {
                warn!("Shutdown requested, abandoning message in progress");
                None
            }
        }
    }

    /// Stops the plugin, removing the staging area. Errors are logged only.
    pub async fn stop(self) {
        let orphaned = self.staging.staged_files().await.len();
        if orphaned > 0 {
            warn!(count = orphaned, "Removing staged images left by abandoned cycles");
        }

        if let Err(e) = self.staging.close().await {
            warn!(error = %e, "Staging area cleanup failed");
        }
        info!("Markdown image relay stopped");
    }
}
