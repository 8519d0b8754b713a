//! Deterministic sizing and relevance selection for extracted text.
//!
//! `sift-core` turns plain or Markdown text into a bounded output: it splits
//! text into size-bounded chunks without breaking semantic units, drops
//! boilerplate chunks, ranks chunks against a query with TF-IDF, and
//! assembles the result under a token, word or character budget. All
//! operations are pure and deterministic: identical inputs always produce
//! identical outputs.

pub mod chunk;
pub mod classify;
pub mod counter;
pub mod document;
pub mod pipeline;
pub mod relevance;
pub mod selection;
pub mod types;

pub use pipeline::{PreparedChunks, SiftError, SiftOptions, Sifter};
