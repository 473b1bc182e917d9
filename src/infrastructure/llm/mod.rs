mod gemini_client;

pub use gemini_client::{GeminiClient, GeminiCredential, NO_TEXT_PLACEHOLDER, create_llm_client};
