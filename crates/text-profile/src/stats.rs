use serde::{Deserialize, Serialize};

/// Diagnostics for the profile document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub exists: bool,
    /// UTF-8 byte length
    pub size_bytes: u64,
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
    pub chunk_count: usize,
    pub file_path: String,
}

/// Whitespace-delimited tokens; empty tokens are discarded
#[must_use]
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// One more than the number of line breaks for non-empty content, 0 for
/// empty. `\n`, `\r\n` and a lone `\r` each count as one break.
#[must_use]
pub fn line_count(content: &str) -> usize {
    if content.is_empty() {
        return 0;
    }
    let mut breaks = 0;
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => breaks += 1,
            '\r' => {
                let _ = chars.next_if_eq(&'\n');
                breaks += 1;
            }
            _ => {}
        }
    }
    breaks + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("rice  wheat\tmillet\n"), 3);
    }

    #[test]
    fn lines() {
        assert_eq!(line_count(""), 0);
        assert_eq!(line_count("one line"), 1);
        assert_eq!(line_count("a\nb\nc"), 3);
        assert_eq!(line_count("trailing\n"), 2);
        assert_eq!(line_count("dos\r\nline"), 2);
        assert_eq!(line_count("old\rmac\rbreaks"), 3);
        assert_eq!(line_count("mixed\r\n\r\nend"), 3);
    }
}
