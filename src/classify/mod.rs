//! Position-aware boilerplate detection.
//!
//! A chunk is extraneous when the share of its words that stem to a known
//! boilerplate term exceeds a threshold that depends on where the chunk sits
//! in the document: strict at the edges, lenient in the middle.

pub mod stopwords;

use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};
use tracing::debug;

use stopwords::BOILERPLATE_STEMS;

const EDGE_THRESHOLD: f64 = 0.10;
const MIDDLE_THRESHOLD: f64 = 0.33;
const SMALL_DOCUMENT_THRESHOLD: f64 = 0.5;
const SMALL_DOCUMENT_CHUNKS: usize = 3;

pub struct ExtraneousClassifier {
    stemmer: Stemmer,
    stems: HashSet<&'static str>,
}

impl Default for ExtraneousClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtraneousClassifier {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stems: BOILERPLATE_STEMS.iter().copied().collect(),
        }
    }

    /// Returns `true` when the chunk at `index` of `total` looks like boilerplate.
    ///
    /// An invalid position fails open (`false`); a chunk with no alphabetic
    /// words is always extraneous.
    pub fn is_extraneous(&self, chunk_text: &str, index: usize, total: usize) -> bool {
        if total == 0 || index >= total {
            return false;
        }

        let tokens = word_tokens(chunk_text);
        if tokens.is_empty() {
            return true;
        }

        let boilerplate = tokens
            .iter()
            .filter(|token| self.stems.contains(&*self.stemmer.stem(token)))
            .count();

        let ratio = boilerplate as f64 / tokens.len() as f64;
        let threshold = threshold(index, total);
        let extraneous = ratio > threshold;

        debug!(index, total, ratio, threshold, extraneous, "classified chunk");
        extraneous
    }
}

/// Position-adjusted threshold: flat 0.5 for documents of three chunks or
/// fewer, otherwise an inverted V from 0.10 at either edge to 0.33 mid-document.
pub fn threshold(index: usize, total: usize) -> f64 {
    if total == 0 || index >= total {
        return MIDDLE_THRESHOLD;
    }
    if total <= SMALL_DOCUMENT_CHUNKS {
        return SMALL_DOCUMENT_THRESHOLD;
    }

    let position = index as f64 / (total - 1) as f64;
    let factor = 1.0 - (2.0 * position - 1.0).abs();
    EDGE_THRESHOLD + (MIDDLE_THRESHOLD - EDGE_THRESHOLD) * factor
}

/// Lowercased, purely alphabetic ASCII words. Runs glued to digits or
/// underscores are not words.
fn word_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|run| !run.is_empty() && run.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_string)
        .collect()
}
