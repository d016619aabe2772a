use crate::config::ChunkingConfig;
use crate::error::{Result, TextProfileError};

/// Splits text into overlapping, word-aligned windows for embedding.
///
/// Lengths are counted in characters (Unicode scalar values), never bytes,
/// so a window boundary can never fall inside a multi-byte sequence.
#[derive(Debug, Clone, Default)]
pub struct TextChunker {
    config: ChunkingConfig,
}

impl TextChunker {
    /// Create a chunker, rejecting configurations that could not advance
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate().map_err(TextProfileError::invalid_config)?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk `content`.
    ///
    /// * empty content yields no chunks
    /// * content that fits one window is returned whole
    /// * otherwise each window holds at most `chunk_size` characters; an end
    ///   that would cut a word moves back to just after the previous
    ///   whitespace, as long as more than half the window survives
    /// * the next window starts `overlap` characters before the previous end,
    ///   moved forward to the next word start if that lies inside the overlap
    #[must_use]
    pub fn chunk(&self, content: &str) -> Vec<String> {
        let chars: Vec<char> = content.chars().collect();
        let total = chars.len();
        let size = self.config.chunk_size;
        let overlap = self.config.overlap;

        if total == 0 {
            return Vec::new();
        }
        if total <= size {
            return vec![content.to_string()];
        }

        let min_keep = size / 2;
        let mut chunks = Vec::with_capacity(self.estimate_count(total));
        let mut start = 0;

        loop {
            let mut end = (start + size).min(total);
            if end < total && splits_word(&chars, end) {
                if let Some(boundary) = (start + min_keep + 1..end)
                    .rev()
                    .find(|&i| chars[i - 1].is_whitespace())
                {
                    end = boundary;
                }
            }

            chunks.push(chars[start..end].iter().collect());
            if end == total {
                break;
            }

            let mut next = end - overlap;
            if overlap > 0 && splits_word(&chars, next) {
                if let Some(word_start) = (next + 1..end)
                    .find(|&i| chars[i - 1].is_whitespace() && !chars[i].is_whitespace())
                {
                    next = word_start;
                }
            }
            start = next;
        }

        chunks
    }

    /// Expected number of chunks for `total` characters without snapping
    #[must_use]
    pub fn estimate_count(&self, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        if total <= self.config.chunk_size {
            return 1;
        }
        (total - self.config.overlap).div_ceil(self.config.stride())
    }
}

/// True when the boundary before `chars[index]` falls inside a word
fn splits_word(chars: &[char], index: usize) -> bool {
    index > 0
        && index < chars.len()
        && !chars[index - 1].is_whitespace()
        && !chars[index].is_whitespace()
}
