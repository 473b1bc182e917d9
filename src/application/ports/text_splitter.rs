use crate::domain::TextChunk;

pub trait TextSplitter: Send + Sync {
    /// Partitions `text` into ordered chunks whose concatenation equals `text`.
    fn split(&self, text: &str) -> Vec<TextChunk>;

    fn max_chunk_chars(&self) -> usize;
}
