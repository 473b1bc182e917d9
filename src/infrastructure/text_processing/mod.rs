mod fixed_character_splitter;
mod plain_text_adapter;

pub use fixed_character_splitter::{DEFAULT_MAX_CHUNK_CHARS, FixedCharacterSplitter};
pub use plain_text_adapter::PlainTextAdapter;
