use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 500;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid")
});

pub trait TextSplitter {
    fn split_text(&self, text: &str) -> Vec<String>;
}

/// Greedy paragraph packer.
///
/// Paragraphs are separated by blank lines. Consecutive paragraphs are joined
/// with `"\n\n"` while the joined chunk stays within `max_length` characters.
/// A paragraph that is longer than `max_length` on its own is emitted whole
/// as a single oversized chunk.
#[derive(Debug, Clone)]
pub struct ParagraphSplitter {
    max_length: usize,
}

impl Default for ParagraphSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_LENGTH)
    }
}

impl ParagraphSplitter {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl TextSplitter for ParagraphSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for paragraph in PARAGRAPH_BREAK.split(text) {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }
            let paragraph_len = paragraph.chars().count();

            let joined_len = if current.is_empty() {
                paragraph_len
            } else {
                current_len + PARAGRAPH_SEPARATOR.len() + paragraph_len
            };

            if joined_len <= self.max_length {
                if !current.is_empty() {
                    current.push_str(PARAGRAPH_SEPARATOR);
                }
                current.push_str(paragraph);
                current_len = joined_len;
                continue;
            }

            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if paragraph_len > self.max_length {
                chunks.push(paragraph.to_string());
            } else {
                current.push_str(paragraph);
                current_len = paragraph_len;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}
