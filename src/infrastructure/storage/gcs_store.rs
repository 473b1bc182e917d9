use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::TryStreamExt;
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::path::Path as StorePath;
use object_store::signer::Signer;
use object_store::{
    Attribute, AttributeValue, Attributes, GetOptions, ObjectMeta, ObjectStore, PutMultipartOpts,
};

use crate::application::ports::{ContentStore, ContentStoreError};
use crate::domain::{ArtifactId, ContentType, StorageBackend, StoredArtifact, format_timestamp};

use super::transfer::{download_to, upload_file};

const ORIGINAL_FILENAME_KEY: &str = "originalFilename";
const UPLOADED_AT_KEY: &str = "uploadedAt";

/// How the access URL handed back to callers is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessUrlMode {
    /// `https://storage.googleapis.com/<bucket>/<id>`. Objects are not made
    /// public on upload, so the bucket itself must allow public reads.
    Public,
    /// GET URL signed for the given lifetime, minted on every describe/list.
    Signed(Duration),
}

pub struct GcsContentStore {
    inner: Arc<GoogleCloudStorage>,
    bucket: String,
    access_url: AccessUrlMode,
    download_dir: PathBuf,
}

impl GcsContentStore {
    pub fn new(
        bucket: &str,
        service_account_path: &str,
        access_url: AccessUrlMode,
        download_dir: PathBuf,
    ) -> Result<Self, ContentStoreError> {
        let store = GoogleCloudStorageBuilder::new()
            .with_bucket_name(bucket)
            .with_service_account_path(service_account_path)
            .build()
            .map_err(|e| ContentStoreError::Backend(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
            bucket: bucket.to_string(),
            access_url,
            download_dir,
        })
    }

    async fn access_url_for(&self, location: &StorePath) -> Result<String, ContentStoreError> {
        match self.access_url {
            AccessUrlMode::Public => Ok(format!(
                "https://storage.googleapis.com/{}/{}",
                self.bucket, location
            )),
            AccessUrlMode::Signed(ttl) => {
                let url = self
                    .inner
                    .signed_url(reqwest::Method::GET, location, ttl)
                    .await
                    .map_err(|e| ContentStoreError::Backend(e.to_string()))?;
                Ok(url.to_string())
            }
        }
    }

    async fn artifact_for(&self, id: &ArtifactId) -> Result<StoredArtifact, ContentStoreError> {
        let location = StorePath::from(id.as_str());
        let head = self
            .inner
            .get_opts(
                &location,
                GetOptions {
                    head: true,
                    ..Default::default()
                },
            )
            .await?;

        self.artifact_from_parts(id, &head.meta, &head.attributes)
            .await
    }

    async fn artifact_from_parts(
        &self,
        id: &ArtifactId,
        meta: &ObjectMeta,
        attributes: &Attributes,
    ) -> Result<StoredArtifact, ContentStoreError> {
        let access_url = self.access_url_for(&meta.location).await?;
        Ok(artifact_from_object(id, meta, attributes, access_url))
    }
}

/// Builds the artifact record from object attributes, falling back to the id,
/// the object's last-modified time and the extension table for anything the
/// upload did not record.
fn artifact_from_object(
    id: &ArtifactId,
    meta: &ObjectMeta,
    attributes: &Attributes,
    access_url: String,
) -> StoredArtifact {
    let read = |attribute: &Attribute| -> Option<String> {
        attributes
            .get(attribute)
            .map(|value| AsRef::<str>::as_ref(value).to_string())
            .filter(|value| !value.is_empty())
    };

    StoredArtifact {
        id: id.to_string(),
        original_name: read(&Attribute::Metadata(ORIGINAL_FILENAME_KEY.into()))
            .unwrap_or_else(|| id.to_string()),
        content_type: read(&Attribute::ContentType).unwrap_or_else(|| {
            ContentType::from_file_name(id.as_str())
                .as_mime()
                .to_string()
        }),
        size_bytes: meta.size as u64,
        uploaded_at: read(&Attribute::Metadata(UPLOADED_AT_KEY.into()))
            .unwrap_or_else(|| format_timestamp(meta.last_modified)),
        access_url,
    }
}

#[async_trait::async_trait]
impl ContentStore for GcsContentStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::GoogleCloud
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
        let uploaded_at = format_timestamp(Utc::now());
        let location = StorePath::from(id.as_str());

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.as_mime()),
        );
        attributes.insert(
            Attribute::Metadata(ORIGINAL_FILENAME_KEY.into()),
            AttributeValue::from(original_name.to_string()),
        );
        attributes.insert(
            Attribute::Metadata(UPLOADED_AT_KEY.into()),
            AttributeValue::from(uploaded_at.clone()),
        );

        let opts = PutMultipartOpts {
            attributes,
            ..Default::default()
        };
        let size = upload_file(self.inner.as_ref(), &location, local_path, opts).await?;

        tracing::info!(id = %id, size, backend = "google_cloud", "artifact stored");

        Ok(StoredArtifact {
            id: id.to_string(),
            original_name: original_name.to_string(),
            content_type: content_type.as_mime().to_string(),
            size_bytes: size,
            uploaded_at,
            access_url: self.access_url_for(&location).await?,
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
        self.artifact_for(&id).await
    }

    async fn list(&self) -> Result<Vec<StoredArtifact>, ContentStoreError> {
        let objects: Vec<ObjectMeta> = self.inner.list(None).try_collect().await?;

        let mut artifacts = Vec::with_capacity(objects.len());
        for meta in objects {
            let id = match ArtifactId::parse(meta.location.as_ref()) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(location = %meta.location, error = %e, "skipping foreign object");
                    continue;
                }
            };
            artifacts.push(self.artifact_for(&id).await?);
        }
        Ok(artifacts)
    }

    async fn delete(&self, id: &str) -> Result<(), ContentStoreError> {
        let id = ArtifactId::parse(id)?;
        self.inner.delete(&StorePath::from(id.as_str())).await?;
        tracing::info!(id = %id, backend = "google_cloud", "artifact deleted");
        Ok(())
    }
}
