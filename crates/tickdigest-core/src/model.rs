//! Summarization and translation model capabilities.

use std::fmt;
use std::num::NonZeroUsize;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Requested output length for one summarization call.
///
/// Lengths are in model units (roughly words). `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBounds {
    min: u32,
    max: u32,
}

impl LengthBounds {
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] if `min > max` or `max` is zero.
    pub fn new(min: u32, max: u32) -> Result<Self, ModelError> {
        if max == 0 {
            return Err(ModelError::InvalidInput("max_length must be > 0".into()));
        }
        if min > max {
            return Err(ModelError::InvalidInput(format!(
                "min_length {min} exceeds max_length {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Bounds scaled to the input: at most half the input's word count,
    /// capped at `cap.max()`, and never below one. The minimum is lowered
    /// to fit under the scaled maximum.
    #[must_use]
    pub fn scaled_to(input: &str, cap: LengthBounds) -> Self {
        let words = u32::try_from(input.split_whitespace().count()).unwrap_or(u32::MAX);
        let max = (words / 2).clamp(1, cap.max);
        Self {
            min: cap.min.min(max),
            max,
        }
    }

    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }
}

/// Source and target language codes for translation, e.g. `en` → `ko`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new("en", "ko")
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Maps text to a shorter text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Largest input, in characters, the model accepts in one call.
    fn max_input_chars(&self) -> NonZeroUsize;

    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, ModelError>;
}

/// Maps text in one language to another.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Largest input, in characters, the model accepts in one call.
    fn max_input_chars(&self) -> NonZeroUsize;

    async fn translate(&self, text: &str, languages: &LanguagePair)
        -> Result<String, ModelError>;
}
