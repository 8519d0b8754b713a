//! Term-weighted relevance scoring (TF-IDF) over an immutable chunk corpus.

pub mod corpus;

pub use corpus::Corpus;

const MIN_TERM_LEN: usize = 3;

/// Lowercases, splits on any character outside `[a-z0-9_-]` and drops
/// terms shorter than three characters. Queries and documents share it.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .filter(|term| term.len() >= MIN_TERM_LEN)
        .map(str::to_string)
        .collect()
}
