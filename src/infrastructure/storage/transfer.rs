use std::path::Path;

use futures::StreamExt;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutMultipartOpts, WriteMultipart};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::application::ports::ContentStoreError;

const MAX_IN_FLIGHT_PARTS: usize = 4;

/// Streams a local file into the object store and returns the bytes written.
pub(super) async fn upload_file(
    store: &dyn ObjectStore,
    location: &StorePath,
    source: &Path,
    opts: PutMultipartOpts,
) -> Result<u64, ContentStoreError> {
    let file = match File::open(source).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ContentStoreError::SourceNotFound(source.to_path_buf()));
        }
        Err(e) => return Err(ContentStoreError::Io(e)),
    };

    let upload = store
        .put_multipart_opts(location, opts)
        .await
        .map_err(|e| ContentStoreError::UploadFailed(e.to_string()))?;
    let mut writer = WriteMultipart::new(upload);

    let mut stream = ReaderStream::new(file);
    let mut total_bytes: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let bytes = match chunk {
            Ok(b) => b,
            Err(e) => {
                let _ = writer.abort().await;
                return Err(ContentStoreError::Io(e));
            }
        };
        if let Err(e) = writer.wait_for_capacity(MAX_IN_FLIGHT_PARTS).await {
            let _ = writer.abort().await;
            return Err(ContentStoreError::UploadFailed(e.to_string()));
        }
        total_bytes += bytes.len() as u64;
        writer.write(&bytes);
    }

    writer
        .finish()
        .await
        .map_err(|e| ContentStoreError::UploadFailed(e.to_string()))?;

    Ok(total_bytes)
}

/// Copies an object to `destination`, creating parent directories. A partial
/// file is removed when the transfer fails.
pub(super) async fn download_to(
    store: &dyn ObjectStore,
    location: &StorePath,
    destination: &Path,
) -> Result<(), ContentStoreError> {
    let result = store.get(location).await?;

    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = File::create(destination).await?;
    let mut stream = result.into_stream();

    while let Some(chunk) = stream.next().await {
        let written = match chunk {
            Ok(bytes) => file.write_all(&bytes).await.map_err(ContentStoreError::Io),
            Err(e) => Err(ContentStoreError::DownloadFailed(e.to_string())),
        };
        if let Err(e) = written {
            drop(file);
            let _ = tokio::fs::remove_file(destination).await;
            return Err(e);
        }
    }

    file.flush().await?;
    Ok(())
}
