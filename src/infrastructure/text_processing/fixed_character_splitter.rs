use crate::application::ports::TextSplitter;
use crate::domain::TextChunk;

pub const DEFAULT_MAX_CHUNK_CHARS: usize = 8000;

/// Cuts text every `chunk_size` characters with no regard for sentence or
/// paragraph boundaries.
pub struct FixedCharacterSplitter {
    chunk_size: usize,
}

impl FixedCharacterSplitter {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Default for FixedCharacterSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_CHARS)
    }
}

impl TextSplitter for FixedCharacterSplitter {
    fn split(&self, text: &str) -> Vec<TextChunk> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;
        let mut offset = 0;

        for ch in text.chars() {
            current.push(ch);
            current_len += 1;
            if current_len == self.chunk_size {
                chunks.push(TextChunk::new(
                    chunks.len(),
                    offset,
                    std::mem::take(&mut current),
                ));
                offset += current_len;
                current_len = 0;
            }
        }

        if !current.is_empty() {
            chunks.push(TextChunk::new(chunks.len(), offset, current));
        }

        chunks
    }

    fn max_chunk_chars(&self) -> usize {
        self.chunk_size
    }
}
