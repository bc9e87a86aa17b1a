//! Port definition for fetching remote images into the staging area.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::entities::{ImageReference, StagedImage};
use crate::domain::errors::FetchError;

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Port for downloading one image reference into a local file.
/// Implementations must be thread-safe.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Fetches `reference` and writes it to a fresh file inside `staging_dir`.
    ///
    /// Every failure is reported as a [`FetchError`]; no partial file is left
    /// behind when an error is returned.
    async fn fetch(&self, reference: &ImageReference, staging_dir: &Path)
    -> FetchResult<StagedImage>;
}
