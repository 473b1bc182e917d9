/// Contiguous slice of a larger text, measured in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub index: usize,
    pub offset: usize,
    pub text: String,
}

impl TextChunk {
    pub fn new(index: usize, offset: usize, text: String) -> Self {
        Self {
            index,
            offset,
            text,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
