pub mod context_bundle;
pub mod identifiers;

use serde::{Deserialize, Serialize};

use crate::relevance::tokenize;

pub use context_bundle::{SelectionMetadata, SelectionMode, SelectionResult, SiftResult};
pub use identifiers::SourceVersion;

/// A contiguous slice of source text with its stable position in the
/// document's chunk sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub index: usize,
    #[serde(default)]
    pub score: f64,
}

impl Chunk {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
            score: 0.0,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// A shortened copy carrying the same index and score.
    pub fn truncated(&self, text: String) -> Self {
        Self {
            text,
            index: self.index,
            score: self.score,
        }
    }

    /// Wraps plain chunk texts, assigning indices in order.
    pub fn from_texts<I, S>(texts: I) -> Vec<Chunk>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk::new(text, index))
            .collect()
    }
}

/// A relevance query and its normalized terms.
/// Normalization rules:
/// - Lowercase
/// - Split on anything outside `[a-z0-9_-]`
/// - Terms shorter than 3 characters dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub raw: String,
    pub terms: Vec<String>,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let terms = tokenize(&raw);
        Self { raw, terms }
    }

    /// A query with no visible characters does not switch selection into search mode.
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}
