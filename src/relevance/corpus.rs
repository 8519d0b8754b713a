use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::tokenize;
use crate::selection::Scorer;
use crate::types::Query;

/// Pre-computed term statistics for a fixed, ordered set of documents.
///
/// Built once per scoring session and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<String>,
    term_frequencies: Vec<BTreeMap<String, f64>>,
    document_frequencies: BTreeMap<String, usize>,
}

impl Corpus {
    pub fn new<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<String> = documents.into_iter().map(Into::into).collect();
        let mut term_frequencies = Vec::with_capacity(documents.len());
        let mut document_frequencies: BTreeMap<String, usize> = BTreeMap::new();

        for doc in &documents {
            let tokens = tokenize(doc);
            let unique: BTreeSet<&String> = tokens.iter().collect();
            for term in unique {
                *document_frequencies.entry(term.clone()).or_insert(0) += 1;
            }
            term_frequencies.push(term_frequency(&tokens));
        }

        debug!(
            documents = documents.len(),
            terms = document_frequencies.len(),
            "built tf-idf corpus"
        );

        Self {
            documents,
            term_frequencies,
            document_frequencies,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document(&self, index: usize) -> Option<&str> {
        self.documents.get(index).map(String::as_str)
    }

    /// Number of documents containing `term` at least once.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequencies.get(term).copied().unwrap_or(0)
    }

    /// Sum of `tf * ln(N / df)` over query terms present in document `index`.
    ///
    /// 0.0 for an empty query, an empty corpus, an out-of-range index, or no
    /// shared terms.
    pub fn score(&self, query: &Query, index: usize) -> f64 {
        let Some(doc_tf) = self.term_frequencies.get(index) else {
            debug!(index, total = self.documents.len(), "score requested for invalid index");
            return 0.0;
        };
        if query.terms.is_empty() {
            return 0.0;
        }

        let total = self.documents.len() as f64;
        let score: f64 = query
            .terms
            .iter()
            .filter_map(|term| {
                let tf = *doc_tf.get(term)?;
                let df = self.document_frequency(term);
                (df > 0).then(|| tf * (total / df as f64).ln())
            })
            .sum();

        debug!(index, query_terms = query.terms.len(), score, "scored document");
        score
    }
}

impl Scorer for Corpus {
    fn score(&self, query: &Query, index: usize) -> f64 {
        Corpus::score(self, query, index)
    }
}

/// Relative frequency of each term within one document.
fn term_frequency(tokens: &[String]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }

    let total = tokens.len() as f64;
    counts
        .into_iter()
        .map(|(term, count)| (term, count as f64 / total))
        .collect()
}
