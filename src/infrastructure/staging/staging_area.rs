//! Process-lifetime staging directory for downloaded images.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::errors::StagingError;

/// Default prefix of the staging directory name.
pub const DEFAULT_PREFIX: &str = "md_image_relay_";

/// Ephemeral directory holding staged images between fetch and emission.
///
/// Unique per instance. Removed by [`StagingArea::close`], or on drop if it
/// was never closed.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    created_at: DateTime<Utc>,
}

impl StagingArea {
    /// Creates a fresh staging directory.
    ///
    /// The directory is created under `parent` (created if missing) or the
    /// system temp directory, with a random suffix after `prefix`.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn create(parent: Option<&Path>, prefix: &str) -> Result<Self, StagingError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);

        let dir = match parent {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StagingError::create(parent.display().to_string(), e.to_string())
                })?;
                builder.tempdir_in(parent)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| {
            let parent = parent.map_or_else(std::env::temp_dir, Path::to_path_buf);
            StagingError::create(parent.display().to_string(), e.to_string())
        })?;

        let area = Self {
            dir,
            created_at: Utc::now(),
        };

        info!(path = %area.path().display(), "Staging area created");

        Ok(area)
    }

    /// Returns the staging directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns when the staging area was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the paths of files currently staged.
    ///
    /// Files from abandoned cycles stay here until the area is closed.
    pub async fn staged_files(&self) -> Vec<PathBuf> {
        let Ok(mut entries) = fs::read_dir(self.path()).await else {
            return Vec::new();
        };

        let mut files = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            files.push(entry.path());
        }
        files
    }

    /// Removes the staging directory and everything in it.
    ///
    /// A directory that is already gone counts as removed.
    ///
    /// # Errors
    /// Returns error if the directory exists but cannot be removed.
    pub async fn close(self) -> Result<(), StagingError> {
        let path: PathBuf = self.path().to_path_buf();
        let age = Utc::now() - self.created_at;
        let dir = self.dir;

        let result = tokio::task::spawn_blocking(move || dir.close())
            .await
            .map_err(|e| StagingError::cleanup(path.display().to_string(), e.to_string()))?;

        match result {
            Ok(()) => {
                info!(
                    path = %path.display(),
                    age_secs = age.num_seconds(),
                    "Staging area removed"
                );
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Staging area already removed");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove staging area");
                Err(StagingError::cleanup(path.display().to_string(), e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_in_parent_with_prefix() {
        let parent = tempdir().unwrap();
        let area = StagingArea::create(Some(parent.path()), "relay_test_").unwrap();

        assert!(area.path().is_dir());
        assert!(area.path().starts_with(parent.path()));
        let name = area.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("relay_test_"));
    }

    #[tokio::test]
    async fn test_creates_missing_parent() {
        let parent = tempdir().unwrap();
        let nested = parent.path().join("a").join("b");
        let area = StagingArea::create(Some(&nested), DEFAULT_PREFIX).unwrap();

        assert!(area.path().starts_with(&nested));
    }

    #[tokio::test]
    async fn test_instances_are_unique() {
        let parent = tempdir().unwrap();
        let first = StagingArea::create(Some(parent.path()), DEFAULT_PREFIX).unwrap();
        let second = StagingArea::create(Some(parent.path()), DEFAULT_PREFIX).unwrap();

        assert_ne!(first.path(), second.path());
    }

    #[tokio::test]
    async fn test_close_removes_directory_recursively() {
        let area = StagingArea::create(None, DEFAULT_PREFIX).unwrap();
        let path = area.path().to_path_buf();
        std::fs::write(path.join("a.png"), b"a").unwrap();
        std::fs::create_dir(path.join("nested")).unwrap();
        std::fs::write(path.join("nested").join("b.png"), b"b").unwrap();

        assert_eq!(area.staged_files().await.len(), 2);
        area.close().await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_close_tolerates_missing_directory() {
        let area = StagingArea::create(None, DEFAULT_PREFIX).unwrap();
        std::fs::remove_dir_all(area.path()).unwrap();

        tokio_test::assert_ok!(area.close().await);
    }

    #[tokio::test]
    async fn test_close_reports_failure_when_path_is_not_a_directory() {
        let parent = tempdir().unwrap();
        let area = StagingArea::create(Some(parent.path()), DEFAULT_PREFIX).unwrap();
        let path = area.path().to_path_buf();
        std::fs::remove_dir(&path).unwrap();
        std::fs::write(&path, b"not a directory").unwrap();

        let result = area.close().await;

        assert!(matches!(result, Err(StagingError::Cleanup { .. })));
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn test_drop_removes_directory() {
        let path = {
            let area = StagingArea::create(None, DEFAULT_PREFIX).unwrap();
            std::fs::write(area.path().join("orphan.jpg"), b"x").unwrap();
            area.path().to_path_buf()
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_create_fails_when_parent_is_a_file() {
        let parent = tempdir().unwrap();
        let file = parent.path().join("not_a_dir");
        std::fs::write(&file, b"x").unwrap();

        let result = StagingArea::create(Some(&file), DEFAULT_PREFIX);
        assert!(matches!(result, Err(StagingError::Create { .. })));
    }
}
