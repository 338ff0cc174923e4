//! Bounded slices of the input text.

use serde::{Deserialize, Serialize};

/// A contiguous slice of the input text handed to one extraction call.
///
/// `start..end` are byte offsets into the original text; `text` is exactly
/// that slice, so concatenating every chunk of a split reproduces the input.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
pub struct Chunk {
    /// Zero-based position in the split
    index: usize,
    /// Byte offset of the first character
    start: usize,
    /// Byte offset one past the last character
    end: usize,
    /// Whitespace-delimited words in `text`
    word_count: usize,
    /// The slice itself
    text: String,
}

impl Chunk {
    /// Length of the slice in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the slice holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the slice holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
