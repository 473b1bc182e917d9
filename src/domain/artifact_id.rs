use std::fmt;
use std::path::Path;

use uuid::Uuid;

pub const SIDECAR_SUFFIX: &str = ".meta.json";

/// Storage key of a stored artifact: a random UUID followed by the original
/// file extension. Extensions with anything other than ASCII letters and
/// digits are dropped so the key never needs escaping in a store path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn generate(original_name: &str) -> Self {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        Self(format!("{}{}", Uuid::new_v4(), extension))
    }

    /// Validates an id received from a caller.
    pub fn parse(raw: &str) -> Result<Self, InvalidArtifactId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidArtifactId("id must not be empty".to_string()));
        }
        if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
            return Err(InvalidArtifactId(format!("{trimmed} is not a plain file id")));
        }
        if trimmed.ends_with(SIDECAR_SUFFIX) {
            return Err(InvalidArtifactId(format!(
                "{trimmed} names a metadata sidecar"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn sidecar_name(&self) -> String {
        format!("{}{}", self.0, SIDECAR_SUFFIX)
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid artifact id: {0}")]
pub struct InvalidArtifactId(pub String);
