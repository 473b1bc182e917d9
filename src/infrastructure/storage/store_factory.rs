use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ContentStore, ContentStoreError};
use crate::presentation::config::{AccessUrlSetting, StorageSettings};

use super::gcs_store::{AccessUrlMode, GcsContentStore};
use super::local_store::LocalContentStore;

/// Picks the storage backend once. Remote storage needs a bucket name and
/// service-account credentials; anything short of a working remote client
/// yields the local store.
pub struct ContentStoreFactory;

impl ContentStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn ContentStore>, ContentStoreError> {
        if let Some(remote) = Self::try_remote(settings) {
            return Ok(remote);
        }

        let store = LocalContentStore::new(
            PathBuf::from(&settings.local_path),
            PathBuf::from(&settings.download_path),
            settings.local_url_prefix.clone(),
        )?;
        tracing::info!(
            backend = "local",
            root = %store.root().display(),
            "using local storage"
        );
        Ok(Arc::new(store))
    }

    fn try_remote(settings: &StorageSettings) -> Option<Arc<dyn ContentStore>> {
        let Some(bucket) = non_blank(settings.bucket_name.as_deref()) else {
            tracing::info!("bucket name not set, using local storage");
            return None;
        };
        let Some(credentials) = non_blank(settings.service_account_path.as_deref()) else {
            tracing::warn!(bucket, "bucket set without credentials, using local storage");
            return None;
        };

        let access_url = match settings.access_url {
            AccessUrlSetting::Public => AccessUrlMode::Public,
            AccessUrlSetting::Signed => {
                AccessUrlMode::Signed(Duration::from_secs(settings.signed_url_ttl_secs))
            }
        };

        match GcsContentStore::new(
            bucket,
            credentials,
            access_url,
            PathBuf::from(&settings.download_path),
        ) {
            Ok(store) => {
                tracing::info!(backend = "google_cloud", bucket, "using Google Cloud Storage");
                if access_url == AccessUrlMode::Public {
                    tracing::warn!(
                        bucket,
                        "public access URLs resolve only if the bucket allows public reads, \
                         objects are not made public on upload; set storage.access_url = \"signed\" otherwise"
                    );
                }
                Some(Arc::new(store))
            }
            Err(e) => {
                tracing::warn!(
                    bucket,
                    error = %e,
                    "Google Cloud Storage initialization failed, using local storage"
                );
                None
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
