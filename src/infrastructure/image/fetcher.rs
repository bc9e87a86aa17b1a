//! HTTP image fetcher that streams downloads into the staging area.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::domain::entities::{ImageReference, StagedImage};
use crate::domain::errors::FetchError;
use crate::domain::ports::{FetchResult, ImageFetcherPort};
use crate::infrastructure::config::FetchConfig;

/// Error building the HTTP client.
#[derive(Debug, Error)]
#[error("failed to create HTTP client: {0}")]
pub struct HttpClientError(#[from] reqwest::Error);

/// Downloads images with a single GET per reference.
///
/// Only `200 OK` counts as success. Redirects follow the client default
/// policy; no retries are attempted.
pub struct HttpImageFetcher {
    client: Client,
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher").finish_non_exhaustive()
    }
}

impl HttpImageFetcher {
    /// Creates a fetcher from configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &FetchConfig) -> Result<Self, HttpClientError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    fn classify(url: &str, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(url)
        } else if error.is_builder() {
            FetchError::invalid_url(url, error.to_string())
        } else if error.is_connect() {
            FetchError::network(url, format!("failed to connect: {error}"))
        } else {
            FetchError::network(url, error.to_string())
        }
    }

    /// Writes the response body to `path` chunk by chunk.
    async fn stream_to_file(url: &str, mut response: Response, path: &Path) -> FetchResult<u64> {
        let io_error =
            |e: std::io::Error| FetchError::io(url, path.display().to_string(), e.to_string());

        let mut file = fs::File::create(path).await.map_err(io_error)?;
        let mut written = 0u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Self::classify(url, &e))?
        {
            file.write_all(&chunk).await.map_err(io_error)?;
            written += chunk.len() as u64;
            trace!(url = %url, chunk = chunk.len(), written, "Wrote chunk");
        }

        file.flush().await.map_err(io_error)?;

        Ok(written)
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(
        &self,
        reference: &ImageReference,
        staging_dir: &Path,
    ) -> FetchResult<StagedImage> {
        let url = reference.url();
        debug!(url = %url, "Downloading image");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify(url, &e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::status(url, status.as_u16()));
        }

        let id = Uuid::new_v4();
        let path = staging_dir.join(format!("{id}{}", reference.file_extension()));

        match Self::stream_to_file(url, response, &path).await {
            Ok(size) => Ok(StagedImage::new(id, url, path, size)),
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(&path).await
                    && remove_err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!(
                        path = %path.display(),
                        error = %remove_err,
                        "Failed to remove partial download"
                    );
                }
                Err(e)
            }
        }
    }
}
