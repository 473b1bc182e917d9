mod artifact_id;
mod content_type;
mod stored_artifact;
mod text_chunk;

pub use artifact_id::{ArtifactId, InvalidArtifactId, SIDECAR_SUFFIX};
pub use content_type::ContentType;
pub use stored_artifact::{StorageBackend, StoredArtifact, format_timestamp};
pub use text_chunk::TextChunk;
