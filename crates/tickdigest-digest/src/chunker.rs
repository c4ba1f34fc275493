//! Fixed-length text chunking under a model's input ceiling.

use std::num::NonZeroUsize;

/// A contiguous slice of a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk<'a> {
    /// Position of this chunk in reassembly order, starting at 0.
    pub index: usize,
    pub text: &'a str,
}

/// Split `text` into consecutive chunks of at most `max_chunk_len` characters.
///
/// Slicing is by Unicode scalar value, so a multi-byte character is never
/// split, but words and sentences may be. Concatenating the chunks in
/// `index` order reproduces `text` exactly. Empty input yields no chunks.
#[must_use]
pub fn chunk_text(text: &str, max_chunk_len: NonZeroUsize) -> Vec<TextChunk<'_>> {
    let max = max_chunk_len.get();
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max {
            chunks.push(TextChunk {
                index: chunks.len(),
                text: &text[start..offset],
            });
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(TextChunk {
            index: chunks.len(),
            text: &text[start..],
        });
    }

    chunks
}

/// The first `max_len` characters of `text`.
#[must_use]
pub(crate) fn truncate_chars(text: &str, max_len: NonZeroUsize) -> &str {
    match text.char_indices().nth(max_len.get()) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}
