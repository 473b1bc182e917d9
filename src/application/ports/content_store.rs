use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{InvalidArtifactId, StorageBackend, StoredArtifact};

/// Persists uploaded artifacts. Callers only ever hold the artifact id; the
/// store owns the bytes and any metadata kept next to them.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    fn backend(&self) -> StorageBackend;

    async fn store(
        &self,
        local_path: &Path,
        original_name: &str,
    ) -> Result<StoredArtifact, ContentStoreError>;

    /// Copies the artifact to `destination`, or to the store's download
    /// directory when none is given, and returns the written path.
    async fn fetch(
        &self,
        id: &str,
        destination: Option<&Path>,
    ) -> Result<PathBuf, ContentStoreError>;

    async fn describe(&self, id: &str) -> Result<StoredArtifact, ContentStoreError>;

    async fn list(&self) -> Result<Vec<StoredArtifact>, ContentStoreError>;

    async fn delete(&self, id: &str) -> Result<(), ContentStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ContentStoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidArtifactId),
    #[error("invalid original name: {0}")]
    InvalidName(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("source file not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<object_store::Error> for ContentStoreError {
    fn from(e: object_store::Error) -> Self {
        match e {
            object_store::Error::NotFound { path, .. } => Self::NotFound(path),
            other => Self::Backend(other.to_string()),
        }
    }
}
