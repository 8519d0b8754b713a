//! Cascading text splitter.
//!
//! Text is decomposed into ordered, size-bounded chunks by trying delimiters
//! from the largest semantic unit (paragraphs) down to the smallest (words).

pub mod packing;
pub mod splitter;
pub mod strategy;

use serde::{Deserialize, Serialize};

use crate::counter::CountingMethod;

pub use packing::trim_spaces_only;
pub use splitter::split_text;
pub use strategy::{Reattach, SplitStrategy, CASCADE};

/// Chunk-size targets per counting method.
///
/// The target is applied to the splitter as a character length; larger
/// inputs get proportionally larger chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub base_token_size: usize,
    pub base_word_size: usize,
    pub base_char_size: usize,

    pub token_text_threshold: usize,
    pub word_text_threshold: usize,
    pub char_text_threshold: usize,

    pub large_text_multiplier: f64,
}

impl ChunkingConfig {
    pub fn v0() -> Self {
        Self {
            base_token_size: 200,
            base_word_size: 150,
            base_char_size: 700,
            token_text_threshold: 2500,
            word_text_threshold: 1800,
            char_text_threshold: 9500,
            large_text_multiplier: 1.5,
        }
    }

    /// Chunk size to hand to [`split_text`] for `text` under `method`.
    pub fn chunk_size_for(&self, method: CountingMethod, text: &str) -> usize {
        let (base, threshold) = match method {
            CountingMethod::Tokens => (self.base_token_size, self.token_text_threshold),
            CountingMethod::Words => (self.base_word_size, self.word_text_threshold),
            CountingMethod::Characters => (self.base_char_size, self.char_text_threshold),
        };

        if packing::char_len(text) > threshold {
            (base as f64 * self.large_text_multiplier) as usize
        } else {
            base
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::v0()
    }
}
