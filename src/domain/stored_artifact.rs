use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Description of a persisted artifact as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredArtifact {
    pub id: String,
    #[serde(rename = "name")]
    pub original_name: String,
    pub content_type: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    pub uploaded_at: String,
    #[serde(rename = "url")]
    pub access_url: String,
}

/// ISO-8601 timestamp in the form written to metadata fields.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Where artifacts are physically kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Local,
    GoogleCloud,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::GoogleCloud => "google_cloud",
        }
    }
}
