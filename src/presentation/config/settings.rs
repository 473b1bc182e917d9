use std::path::Path;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub llm: LlmSettings,
    pub chunking: ChunkingSettings,
    pub retry: RetrySettings,
    pub transform: TransformSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub max_chunk_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransformSettings {
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub local_path: String,
    pub download_path: String,
    pub local_url_prefix: String,
    pub bucket_name: Option<String>,
    pub service_account_path: Option<String>,
    pub access_url: AccessUrlSetting,
    pub signed_url_ttl_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessUrlSetting {
    Public,
    Signed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Loads settings from the working directory.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), environment)
    }

    /// Layers, lowest to highest: defaults, `appsettings`, `appsettings.<env>`,
    /// `APP__SECTION__KEY` variables, then the bare variables the service has
    /// always honoured (`GEMINI_API_KEY`, `BUCKET_NAME`,
    /// `GOOGLE_APPLICATION_CREDENTIALS`).
    pub fn load_from(config_dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let base = config_dir.join("appsettings");
        let overlay = config_dir.join(format!("appsettings.{}", environment.as_str()));

        Config::builder()
            .set_default("llm.model", "gemini-2.5-flash")?
            .set_default(
                "llm.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("llm.timeout_secs", 120)?
            .set_default("chunking.max_chunk_chars", 8000)?
            .set_default("retry.max_attempts", 3)?
            .set_default("retry.base_delay_ms", 1000)?
            .set_default("transform.max_concurrency", 4)?
            .set_default("storage.local_path", "permanent_storage")?
            .set_default("storage.download_path", "downloads")?
            .set_default("storage.local_url_prefix", "/api/storage/local")?
            .set_default("storage.access_url", "public")?
            .set_default("storage.signed_url_ttl_secs", 900)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::from(base).required(false))
            .add_source(File::from(overlay).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("llm.api_key", std::env::var("GEMINI_API_KEY").ok())?
            .set_override_option("storage.bucket_name", std::env::var("BUCKET_NAME").ok())?
            .set_override_option(
                "storage.service_account_path",
                std::env::var("GOOGLE_APPLICATION_CREDENTIALS").ok(),
            )?
            .build()?
            .try_deserialize()
    }
}
