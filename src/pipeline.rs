//! End-to-end flow: text → split → boilerplate filter → selection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::chunk::{split_text, ChunkingConfig};
use crate::classify::ExtraneousClassifier;
use crate::counter::{new_counter, CounterError, CountingMethod, SharedCounter};
use crate::document::{Document, DocumentError};
use crate::selection::{ContextSelector, FieldPatterns, SelectionConfig, SelectorError};
use crate::types::{Chunk, Query, SiftResult};

#[derive(Debug, Error)]
pub enum SiftError {
    #[error(transparent)]
    Counter(#[from] CounterError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Everything a host decides about one run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SiftOptions {
    pub counting_method: CountingMethod,
    pub selection: SelectionConfig,
    pub query: Option<String>,
    /// Skip boilerplate filtering entirely.
    pub include_all: bool,
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

/// Chunks that survived filtering, with their original split indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedChunks {
    pub chunks: Vec<Chunk>,
    pub total: usize,
    pub filtered: usize,
}

pub struct Sifter {
    options: SiftOptions,
    counter: SharedCounter,
    classifier: ExtraneousClassifier,
    selector: ContextSelector,
}

impl Sifter {
    pub fn new(options: SiftOptions) -> Result<Self, SiftError> {
        let counter = new_counter(options.counting_method)?;
        let selector = ContextSelector::new(Arc::clone(&counter))?;
        Ok(Self {
            options,
            counter,
            classifier: ExtraneousClassifier::new(),
            selector,
        })
    }

    /// Builds a sifter around an existing counter and pattern table, e.g. to
    /// share one token vocabulary across parallel sources.
    pub fn with_shared(options: SiftOptions, counter: SharedCounter, patterns: Arc<FieldPatterns>) -> Self {
        let selector = ContextSelector::with_patterns(Arc::clone(&counter), patterns);
        Self {
            options,
            counter,
            classifier: ExtraneousClassifier::new(),
            selector,
        }
    }

    pub fn options(&self) -> &SiftOptions {
        &self.options
    }

    pub fn counter(&self) -> &SharedCounter {
        &self.counter
    }

    /// Splits `text` with the configured chunk-size target and drops
    /// boilerplate chunks unless `include_all` is set.
    pub fn prepare_chunks(&self, text: &str) -> PreparedChunks {
        let chunk_size = self
            .options
            .chunking
            .chunk_size_for(self.counter.method(), text);
        let pieces = split_text(text, chunk_size);
        let total = pieces.len();

        debug!(
            counting_method = self.counter.name(),
            chunk_size,
            total,
            "prepared text chunks"
        );

        let chunks: Vec<Chunk> = Chunk::from_texts(pieces)
            .into_iter()
            .filter(|chunk| {
                self.options.include_all || !self.classifier.is_extraneous(&chunk.text, chunk.index, total)
            })
            .collect();

        let filtered = total - chunks.len();
        PreparedChunks {
            chunks,
            total,
            filtered,
        }
    }

    #[instrument(skip_all, fields(source = %document.source))]
    pub fn sift(&self, document: &Document) -> SiftResult {
        let prepared = self.prepare_chunks(&document.content);
        let query = self.options.query.as_deref().map(Query::new);
        let result = self
            .selector
            .select(&prepared.chunks, query.as_ref(), &self.options.selection);

        debug!(
            chunks_total = prepared.total,
            chunks_filtered = prepared.filtered,
            units_used = result.selection.units_used,
            "sift complete"
        );

        SiftResult {
            source: document.source.clone(),
            source_version: document.version.clone(),
            chunks_total: prepared.total,
            chunks_filtered: prepared.filtered,
            result,
        }
    }

    /// Convenience for callers that only want the assembled text.
    pub fn sift_text(&self, text: &str) -> String {
        self.sift(&Document::from_text("-", text)).result.text
    }
}
