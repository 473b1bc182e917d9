mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    AccessUrlSetting, ChunkingSettings, LlmSettings, LoggingSettings, RetrySettings, Settings,
    StorageSettings, TransformSettings,
};
