//! Character-offset helpers.
//!
//! Regex engines report byte offsets; every position exposed by ANAR is a
//! zero-based character offset instead.

/// Byte boundaries of every character in a text.
#[derive(Debug, Clone)]
pub struct CharIndex<'a> {
    text: &'a str,
    /// `boundaries[i]` is the byte offset of character `i`; the final entry is `text.len()`.
    boundaries: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Convert a byte offset on a character boundary to a character offset.
    ///
    /// Offsets inside a character resolve to the character that contains them.
    pub fn char_offset(&self, byte: usize) -> usize {
        match self.boundaries.binary_search(&byte) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Slice the text by character range, clipping both ends to the text.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let len = self.char_len();
        let end = end.min(len);
        let start = start.min(end);
        &self.text[self.boundaries[start]..self.boundaries[end]]
    }

    /// Slice `radius` characters either side of the character range `start..end`.
    pub fn window(&self, start: usize, end: usize, radius: usize) -> &'a str {
        self.slice(start.saturating_sub(radius), end.saturating_add(radius))
    }
}
