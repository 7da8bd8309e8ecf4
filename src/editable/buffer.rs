//! Text buffer for the single-line field.
//!
//! The buffer only ever holds printable single-byte characters, so a character
//! index is also a byte index and slicing by range never allocates.

use std::ops::Range;

use super::constraints::is_printable;

/// Owned single-line character sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBuffer {
    text: String,
}

impl FieldBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Access the underlying string
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Total length in characters
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert single character at offset (clamped to the buffer)
    pub fn insert_char(&mut self, offset: usize, ch: char) {
        debug_assert!(is_printable(ch), "non-printable char {ch:?} reached the buffer");
        let offset = offset.min(self.len());
        self.text.insert(offset, ch);
    }

    /// Remove text in range (clamped to the buffer)
    pub fn remove(&mut self, range: Range<usize>) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.text.replace_range(start..end, "");
    }

    /// Clear all content
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Append a character at the end
    pub fn push(&mut self, ch: char) {
        debug_assert!(is_printable(ch), "non-printable char {ch:?} reached the buffer");
        self.text.push(ch);
    }
}
