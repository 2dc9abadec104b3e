/// Progress photo persistence
///
/// Picked images arrive as transient URIs (a camera roll or temp file). They
/// are copied into the app's own photo directory so the reference stored on a
/// DailyLog keeps working after the picker's copy is gone.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::format_log_date;

/// Sub-directory (and stored path prefix) for persisted photos
pub const PHOTO_SUBDIR: &str = "logs";

const DEFAULT_EXTENSION: &str = "jpg";

/// Errors that can occur while persisting a photo
#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Photo not found: {0}")]
    SourceMissing(PathBuf),

    #[error("Failed to copy photo to {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Capability for turning a picked image into a durable reference
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Copy the image at `transient_uri` into app storage
    ///
    /// Returns the durable reference to store on the DailyLog. A reference
    /// that is already durable is returned unchanged.
    async fn persist_picked_photo(
        &self,
        date: NaiveDate,
        transient_uri: &str,
        index_in_day: usize,
    ) -> Result<String, PhotoError>;

    /// Local file path for a durable reference
    fn resolve(&self, durable: &str) -> PathBuf;
}

/// Photo store backed by a directory on the local file system
#[derive(Debug, Clone)]
pub struct FsPhotoStore {
    root: PathBuf,
}

impl FsPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Check whether a reference already points into app storage
    pub fn is_persisted(reference: &str) -> bool {
        reference.starts_with(&format!("{}/", PHOTO_SUBDIR))
    }

    fn source_path(transient_uri: &str) -> PathBuf {
        PathBuf::from(transient_uri.strip_prefix("file://").unwrap_or(transient_uri))
    }

    fn file_name(date: NaiveDate, index_in_day: usize, source: &Path) -> String {
        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        format!(
            "{}_{}_{}.{}",
            format_log_date(date),
            index_in_day,
            Uuid::new_v4().simple(),
            extension
        )
    }
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn persist_picked_photo(
        &self,
        date: NaiveDate,
        transient_uri: &str,
        index_in_day: usize,
    ) -> Result<String, PhotoError> {
        if Self::is_persisted(transient_uri) {
            return Ok(transient_uri.to_string());
        }

        let source = Self::source_path(transient_uri);
        if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
            return Err(PhotoError::SourceMissing(source));
        }

        let dir = self.root.join(PHOTO_SUBDIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| PhotoError::Copy { path: dir.clone(), source })?;

        let file_name = Self::file_name(date, index_in_day, &source);
        let dest = dir.join(&file_name);
        tokio::fs::copy(&source, &dest)
            .await
            .map_err(|e| PhotoError::Copy { path: dest.clone(), source: e })?;

        tracing::debug!("Persisted photo {} for {} as {:?}", index_in_day, date, dest);
        Ok(format!("{}/{}", PHOTO_SUBDIR, file_name))
    }

    fn resolve(&self, durable: &str) -> PathBuf {
        self.root.join(durable)
    }
}
