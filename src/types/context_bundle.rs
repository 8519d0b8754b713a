use serde::{Deserialize, Serialize};

use crate::counter::CountingMethod;
use crate::selection::SizingStrategy;
use crate::types::identifiers::SourceVersion;
use crate::types::Chunk;

/// Whether chunks were ordered by a sizing strategy or by relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Strategy,
    Search,
}

/// Metadata describing the outcome of the selection process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionMetadata {
    pub query: Option<String>,
    pub mode: SelectionMode,
    pub strategy: SizingStrategy,
    pub counting_method: CountingMethod,

    /// 0 means no overall limit.
    pub budget: usize,
    pub units_used: usize,

    pub chunks_considered: usize,
    pub chunks_selected: usize,
    pub chunks_truncated: usize,
}

/// The assembled output of one selection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub text: String,
    /// Selected chunks in document order, truncated copies included.
    pub chunks: Vec<Chunk>,
    pub selection: SelectionMetadata,
}

/// End-to-end result for one source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiftResult {
    pub source: String,
    pub source_version: SourceVersion,
    pub chunks_total: usize,
    pub chunks_filtered: usize,
    pub result: SelectionResult,
}
