use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectMeta, ObjectStore, PutMultipartOpts, PutPayload};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ContentStore, ContentStoreError};
use crate::domain::{
    ArtifactId, ContentType, SIDECAR_SUFFIX, StorageBackend, StoredArtifact, format_timestamp,
};

use super::transfer::{download_to, upload_file};

/// Contents of `<id>.meta.json`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SidecarMetadata {
    id: String,
    name: String,
    content_type: String,
    uploaded_at: String,
    size: u64,
}

/// Keeps artifacts in a local directory, each with a JSON sidecar holding the
/// metadata the filesystem cannot.
pub struct LocalContentStore {
    inner: Arc<LocalFileSystem>,
    root: PathBuf,
    download_dir: PathBuf,
    url_prefix: String,
}

impl LocalContentStore {
    pub fn new(
        root: PathBuf,
        download_dir: PathBuf,
        url_prefix: impl Into<String>,
    ) -> Result<Self, ContentStoreError> {
        if !root.exists() {
            std::fs::create_dir_all(&root)?;
            tracing::info!(root = %root.display(), "created local storage directory");
        }
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| ContentStoreError::Backend(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            root,
            download_dir,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn url_for(&self, id: &str) -> String {
        format!("{}/{}", self.url_prefix, id)
    }

    async fn read_sidecar(&self, id: &ArtifactId) -> Result<Option<SidecarMetadata>, ContentStoreError> {
        let location = StorePath::from(id.sidecar_name());
        let bytes = match self.inner.get(&location).await {
            Ok(result) => result
                .bytes()
                .await
                .map_err(|e| ContentStoreError::DownloadFailed(e.to_string()))?,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<SidecarMetadata>(&bytes) {
            Ok(sidecar) => Ok(Some(sidecar)),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "unreadable sidecar, using file metadata");
                Ok(None)
            }
        }
    }

    async fn artifact_from_meta(
        &self,
        id: &ArtifactId,
        meta: &ObjectMeta,
    ) -> Result<StoredArtifact, ContentStoreError> {
        let artifact = match self.read_sidecar(id).await? {
            Some(sidecar) => StoredArtifact {
                access_url: self.url_for(&sidecar.id),
                id: sidecar.id,
                original_name: sidecar.name,
                content_type: sidecar.content_type,
                size_bytes: sidecar.size,
                uploaded_at: sidecar.uploaded_at,
            },
            None => StoredArtifact {
                id: id.to_string(),
                original_name: id.to_string(),
                content_type: ContentType::from_file_name(id.as_str())
                    .as_mime()
                    .to_string(),
                size_bytes: meta.size as u64,
                uploaded_at: format_timestamp(meta.last_modified),
                access_url: self.url_for(id.as_str()),
            },
        };
        Ok(artifact)
    }

    async fn remove_if_present(&self, location: &StorePath) -> Result<(), ContentStoreError> {
        match self.inner.delete(location).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(ContentStoreError::DeleteFailed(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl ContentStore for LocalContentStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Local
    }

    async fn store(
        &self,
        local_path: &Path,
        original_name: &str,
    ) -> Result<StoredArtifact, ContentStoreError> {
        if original_name.trim().is_empty() {
            return Err(ContentStoreError::InvalidName(
                "original name must not be empty".to_string(),
            ));
        }

        let id = ArtifactId::generate(original_name);
        let content_type = ContentType::from_file_name(original_name);
        let location = StorePath::from(id.as_str());

        let size = upload_file(
            self.inner.as_ref(),
            &location,
            local_path,
            PutMultipartOpts::default(),
        )
        .await?;

        let uploaded_at: DateTime<Utc> = Utc::now();
        let sidecar = SidecarMetadata {
            id: id.to_string(),
            name: original_name.to_string(),
            content_type: content_type.as_mime().to_string(),
            uploaded_at: format_timestamp(uploaded_at),
            size,
        };
        let sidecar_bytes = serde_json::to_vec_pretty(&sidecar)?;
        let sidecar_location = StorePath::from(id.sidecar_name());

        if let Err(e) = self
            .inner
            .put(&sidecar_location, PutPayload::from(sidecar_bytes))
            .await
        {
            if let Err(cleanup) = self.inner.delete(&location).await {
                tracing::warn!(
                    id = %id,
                    error = %cleanup,
                    "could not remove content after sidecar write failed, file is orphaned"
                );
            }
            return Err(ContentStoreError::UploadFailed(e.to_string()));
        }

        tracing::info!(id = %id, size, backend = "local", "artifact stored");

        Ok(StoredArtifact {
            access_url: self.url_for(&sidecar.id),
            id: sidecar.id,
            original_name: sidecar.name,
            content_type: sidecar.content_type,
            size_bytes: sidecar.size,
            uploaded_at: sidecar.uploaded_at,
        })
    }

    async fn fetch(
        &self,
        id: &str,
        destination: Option<&Path>,
    ) -> Result<PathBuf, ContentStoreError> {
        let id = ArtifactId::parse(id)?;
        let target = destination
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.download_dir.join(id.as_str()));

        download_to(self.inner.as_ref(), &StorePath::from(id.as_str()), &target).await?;
        Ok(target)
    }

    async fn describe(&self, id: &str) -> Result<StoredArtifact, ContentStoreError> {
        let id = ArtifactId::parse(id)?;
        let meta = self.inner.head(&StorePath::from(id.as_str())).await?;
        self.artifact_from_meta(&id, &meta).await
    }

    async fn list(&self) -> Result<Vec<StoredArtifact>, ContentStoreError> {
        let listing = self.inner.list_with_delimiter(None).await?;

        let mut artifacts = Vec::new();
        for meta in listing.objects {
            let Some(name) = meta.location.filename() else {
                continue;
            };
            if name.ends_with(SIDECAR_SUFFIX) {
                continue;
            }
            // Escaped names on disk cannot be addressed by id again.
            let id = match ArtifactId::parse(name) {
                Ok(id) if StorePath::from(id.as_str()) == meta.location => id,
                _ => {
                    tracing::warn!(location = %meta.location, "skipping file that is not an artifact id");
                    continue;
                }
            };
            artifacts.push(self.artifact_from_meta(&id, &meta).await?);
        }

        artifacts.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then(a.id.cmp(&b.id)));
        Ok(artifacts)
    }

    async fn delete(&self, id: &str) -> Result<(), ContentStoreError> {
        let id = ArtifactId::parse(id)?;
        self.remove_if_present(&StorePath::from(id.as_str())).await?;
        self.remove_if_present(&StorePath::from(id.sidecar_name()))
            .await?;
        tracing::info!(id = %id, backend = "local", "artifact deleted");
        Ok(())
    }
}
