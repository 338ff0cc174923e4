//! Chunk splitter.

use crate::break_finder::{find_break, floor_char_boundary};
use regex::Regex;
use scenecut_core::{Chunk, ChunkingConfig};
use scenecut_error::{SegmentError, SegmentErrorKind};
use std::ops::Range;
use tracing::{debug, instrument};

/// A word plus the whitespace after it.
const WORD_TOKEN: &str = r"\S+\s*";

/// Divides text into contiguous chunks near a target word budget.
///
/// Chunks are byte slices of the input in order; concatenating them
/// reproduces the input exactly. A piece with fewer than
/// `min_chunk_words` words is folded into the chunk before it, and a cut is
/// never placed before the minimum, so only a single-chunk split can be short.
///
/// # Examples
///
/// ```
/// use scenecut_core::ChunkingConfig;
/// use scenecut_segment::ChunkSplitter;
///
/// let text = "word ".repeat(50);
/// let splitter = ChunkSplitter::new(ChunkingConfig::new(20, 2, 5));
/// let chunks = splitter.split(&text).unwrap();
///
/// let joined: String = chunks.iter().map(|c| c.text().as_str()).collect();
/// assert_eq!(joined, text);
/// assert!(chunks.iter().skip(1).all(|c| *c.word_count() >= 5));
/// ```
#[derive(Debug, Clone, Copy, derive_new::new)]
pub struct ChunkSplitter {
    config: ChunkingConfig,
}

impl ChunkSplitter {
    /// The settings this splitter uses.
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split `text` into chunks.
    ///
    /// Empty and whitespace-only input yields no chunks.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentErrorKind::InvalidInput`] for unusable settings and
    /// [`SegmentErrorKind::Partition`] if the chunks fail to cover the input.
    #[instrument(skip(self, text), fields(text_len = text.len(), target = self.config.target_chunk_words()))]
    pub fn split(&self, text: &str) -> Result<Vec<Chunk>, SegmentError> {
        self.config
            .validate()
            .map_err(|e| SegmentError::new(SegmentErrorKind::InvalidInput(e)))?;

        let word_token = Regex::new(WORD_TOKEN).map_err(|e| {
            SegmentError::new(SegmentErrorKind::InvalidInput(format!(
                "Invalid word pattern: {}",
                e
            )))
        })?;

        let tokens: Vec<Range<usize>> = word_token.find_iter(text).map(|m| m.range()).collect();
        if tokens.is_empty() {
            debug!("No words in input");
            return Ok(Vec::new());
        }

        let spans = self.spans(text, &tokens);
        verify_partition(text, &spans)?;

        let chunks: Vec<Chunk> = spans
            .into_iter()
            .enumerate()
            .map(|(index, span)| {
                let slice = &text[span.clone()];
                Chunk::new(index, span.start, span.end, count_words(slice), slice.to_string())
            })
            .collect();

        debug!(
            chunks = chunks.len(),
            words = tokens.len(),
            "Split text into chunks"
        );
        Ok(chunks)
    }

    fn spans(&self, text: &str, tokens: &[Range<usize>]) -> Vec<Range<usize>> {
        let len = text.len();
        let target = *self.config.target_chunk_words();
        let slack = *self.config.slack_words();
        let min_words = *self.config.min_chunk_words();
        let slack_bytes = self.config.slack_bytes();

        let mut spans: Vec<Range<usize>> = Vec::new();
        let mut pending_start: Option<usize> = None;
        let mut cursor = 0;
        let mut consumed = 0;

        while cursor < len {
            let remaining = tokens.len() - consumed;

            let brk = if remaining < target + slack {
                len
            } else {
                let estimate = tokens[consumed + target - 1].end;
                // The piece must hold at least `min_words` words.
                let floor = min_words
                    .checked_sub(1)
                    .map_or(cursor, |k| tokens[consumed + k].end.max(cursor));
                let search_end = floor_char_boundary(text, (estimate + slack_bytes).min(len));
                let search_start =
                    floor_char_boundary(text, estimate.saturating_sub(slack_bytes).max(floor))
                        .min(search_end);
                let found = find_break(text, search_start, search_end);
                if found > cursor {
                    found
                } else if search_end > cursor {
                    search_end
                } else {
                    len
                }
            };

            let words = count_words(&text[cursor..brk]);
            if words >= min_words || (spans.is_empty() && words > 0) {
                let start = pending_start.take().unwrap_or(cursor);
                spans.push(start..brk);
            } else if let Some(last) = spans.last_mut() {
                debug!(words, "Folding short piece into previous chunk");
                last.end = brk;
            } else {
                pending_start.get_or_insert(cursor);
            }

            consumed = tokens.partition_point(|token| token.start < brk);
            cursor = brk;
        }

        if let Some(start) = pending_start {
            spans.push(start..len);
        }

        spans
    }
}

fn verify_partition(text: &str, spans: &[Range<usize>]) -> Result<(), SegmentError> {
    let contiguous = spans.first().is_some_and(|first| first.start == 0)
        && spans.windows(2).all(|pair| pair[0].end == pair[1].start)
        && spans.last().is_some_and(|last| last.end == text.len());

    if contiguous {
        Ok(())
    } else {
        Err(SegmentError::new(SegmentErrorKind::Partition {
            expected: text.len(),
            covered: spans.iter().map(|span| span.len()).sum(),
        }))
    }
}

pub(crate) fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
