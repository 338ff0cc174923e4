//! Pipeline settings loaded from TOML.

use serde::{Deserialize, Serialize};

/// How the splitter sizes chunks.
///
/// # Examples
///
/// ```
/// use scenecut_core::ChunkingConfig;
///
/// let config = ChunkingConfig::default()
///     .with_target_chunk_words(2000)
///     .with_min_chunk_words(400);
///
/// assert_eq!(*config.target_chunk_words(), 2000);
/// assert_eq!(*config.slack_words(), 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(default, deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct ChunkingConfig {
    /// Words each chunk aims for.
    target_chunk_words: usize,
    /// Words of leeway either side of the target when looking for a break.
    slack_words: usize,
    /// Chunks with fewer words are folded into their predecessor.
    min_chunk_words: usize,
    /// Average bytes per word, used to turn the slack into a byte window.
    chars_per_word: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_chunk_words: 5000,
            slack_words: 500,
            min_chunk_words: 1000,
            chars_per_word: 6,
        }
    }
}

impl ChunkingConfig {
    /// Settings with explicit word budgets and the default byte estimate.
    pub fn new(target_chunk_words: usize, slack_words: usize, min_chunk_words: usize) -> Self {
        Self {
            target_chunk_words,
            slack_words,
            min_chunk_words,
            ..Self::default()
        }
    }

    /// Checks that the settings can drive a split.
    ///
    /// # Errors
    ///
    /// Returns a message when the target or the per-word estimate is zero, or
    /// when the minimum exceeds the target.
    pub fn validate(&self) -> Result<(), String> {
        if self.target_chunk_words == 0 {
            return Err("target_chunk_words must be greater than 0".to_string());
        }
        if self.chars_per_word == 0 {
            return Err("chars_per_word must be greater than 0".to_string());
        }
        if self.min_chunk_words > self.target_chunk_words {
            return Err(format!(
                "min_chunk_words ({}) cannot exceed target_chunk_words ({})",
                self.min_chunk_words, self.target_chunk_words
            ));
        }
        Ok(())
    }

    /// Slack expressed in bytes.
    pub fn slack_bytes(&self) -> usize {
        self.slack_words.saturating_mul(self.chars_per_word)
    }
}

/// How extraction calls are issued.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(default, deny_unknown_fields)]
#[setters(prefix = "with_")]
pub struct ExtractionConfig {
    /// Chunks extracted at the same time.
    max_concurrent_extractions: usize,
    /// Characters of a failed payload kept in error details and repair prompts.
    payload_preview_chars: usize,
    /// Token cap passed to the driver.
    max_tokens: Option<u32>,
    /// Sampling temperature passed to the driver.
    temperature: Option<f32>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_concurrent_extractions: 4,
            payload_preview_chars: 500,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl ExtractionConfig {
    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns a message when concurrency is zero or the temperature is outside `[0, 2]`.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_extractions == 0 {
            return Err("max_concurrent_extractions must be at least 1".to_string());
        }
        match self.temperature {
            Some(t) if !(0.0..=2.0).contains(&t) => {
                Err(format!("temperature must be in [0.0, 2.0], got {}", t))
            }
            _ => Ok(()),
        }
    }
}
