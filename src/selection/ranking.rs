use std::cmp::Ordering;

use crate::types::{Chunk, Query};

/// Relevance of the document at `index` (position in the scored corpus) to `query`.
pub trait Scorer {
    fn score(&self, query: &Query, index: usize) -> f64;
}

/// Scores every chunk (position `i` in `chunks` is corpus index `i`) and
/// orders them by score descending, then by original index ascending.
pub fn rank_chunks<S>(scorer: &S, query: &Query, chunks: &[Chunk]) -> Vec<Chunk>
where
    S: Scorer + ?Sized,
{
    let mut scored: Vec<Chunk> = chunks
        .iter()
        .enumerate()
        .map(|(position, chunk)| chunk.clone().with_score(scorer.score(query, position)))
        .collect();

    scored.sort_by(|a, b| {
        // Descending score
        let score_cmp = b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
        if score_cmp != Ordering::Equal {
            score_cmp
        } else {
            // Ascending index
            a.index.cmp(&b.index)
        }
    });

    debug_assert!(scored.windows(2).all(|w| {
        let a = &w[0];
        let b = &w[1];
        a.score > b.score || (a.score == b.score && a.index <= b.index)
    }));

    scored
}
