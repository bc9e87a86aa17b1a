//! Staged image entity.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A downloaded image waiting in the staging area for emission.
///
/// Lives for one processing cycle only. The file at [`StagedImage::path`] is
/// removed once the image has been emitted (or emission failed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    id: Uuid,
    url: String,
    path: PathBuf,
    size: u64,
}

impl StagedImage {
    /// Creates a staged image record.
    #[must_use]
    pub fn new(id: Uuid, url: impl Into<String>, path: PathBuf, size: u64) -> Self {
        Self {
            id,
            url: url.into(),
            path,
            size,
        }
    }

    /// Returns the unique id used for the staged file name.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the URL the image was fetched from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the local file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of bytes written to disk.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }
}
