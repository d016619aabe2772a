use serde::{Deserialize, Serialize};

/// Configuration for splitting the profile document into embedding chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,

    /// Characters repeated from the end of one chunk at the start of the next
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 50,
        }
    }
}

impl ChunkingConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be > 0".to_string());
        }

        // Word snapping may shorten a window to half its size; the overlap
        // must stay below that or the next window would not advance.
        if self.overlap >= self.chunk_size / 2 {
            return Err(format!(
                "overlap ({}) must be less than half of chunk_size ({})",
                self.overlap, self.chunk_size
            ));
        }

        Ok(())
    }

    /// Advance between consecutive window starts when no snapping occurs
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

/// Length bands used by profile validation, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationThresholds {
    /// Below this the profile carries too little to personalize on
    pub min_informative_chars: usize,

    /// Above this the profile is unusually long
    pub max_comfortable_chars: usize,
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        Self {
            min_informative_chars: 50,
            max_comfortable_chars: 5_000,
        }
    }
}

impl ValidationThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_informative_chars > self.max_comfortable_chars {
            return Err(format!(
                "min_informative_chars ({}) cannot exceed max_comfortable_chars ({})",
                self.min_informative_chars, self.max_comfortable_chars
            ));
        }
        Ok(())
    }
}
