//! Text buffer implementation (Layer 0)
//!
//! Pure text storage with no styling knowledge. All offsets are character
//! (code point) offsets; byte positions never leak out of this module.

use crate::errors::EditorError;
use serde::{Deserialize, Serialize};

/// Core text buffer
///
/// Backed by a single `String`. Suitable for small to medium documents.
/// For large documents, consider a rope-based backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TextBuffer {
    text: String,
    char_len: usize,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            text: String::new(),
            char_len: 0,
        }
    }

    /// Create a buffer from a string
    pub fn from_str(s: &str) -> Self {
        Self {
            text: s.to_string(),
            char_len: s.chars().count(),
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.char_len
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// Full content as a string slice
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of lines (an empty buffer has one empty line)
    pub fn line_count(&self) -> usize {
        self.text.chars().filter(|&c| c == '\n').count() + 1
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Byte offset for a character offset. Caller guarantees `offset <= char_len`.
    fn byte_offset(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Insert text at a character offset
    ///
    /// Returns the number of characters inserted. Fails if `offset > len()`.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<usize, EditorError> {
        if offset > self.char_len {
            return Err(EditorError::offset(offset, self.char_len));
        }
        let byte = self.byte_offset(offset);
        self.text.insert_str(byte, text);
        let inserted = text.chars().count();
        self.char_len += inserted;
        Ok(inserted)
    }

    /// Delete the characters in `[start, end)`
    ///
    /// Returns the removed text. Fails if `start > end` or `end > len()`.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<String, EditorError> {
        if start > end || end > self.char_len {
            return Err(EditorError::Range {
                start,
                end,
                len: self.char_len,
            });
        }
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        let removed: String = self.text.drain(byte_start..byte_end).collect();
        self.char_len -= end - start;
        Ok(removed)
    }

    /// Read the substring in `[start, end)` without side effects
    pub fn read(&self, start: usize, end: usize) -> Result<&str, EditorError> {
        if start > end || end > self.char_len {
            return Err(EditorError::Range {
                start,
                end,
                len: self.char_len,
            });
        }
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        Ok(&self.text[byte_start..byte_end])
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        let char_len = s.chars().count();
        Self { text: s, char_len }
    }
}

impl From<TextBuffer> for String {
    fn from(buffer: TextBuffer) -> Self {
        buffer.text
    }
}
