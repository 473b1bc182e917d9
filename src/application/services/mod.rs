mod document_assistant;
mod prompts;
mod retry;
mod structure_transformer;
mod structured_response;

pub use document_assistant::{AssistantError, DocumentAssistant};
pub use retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, Exhausted, RetryPolicy};
pub use structure_transformer::{DEFAULT_MAX_CONCURRENCY, StructureTransformer};
pub use structured_response::{RAW_FALLBACK_FIELD, parse_structured_response};
