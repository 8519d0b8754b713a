use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Chunk;

/// Which region of the document is preferred when the budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingStrategy {
    #[default]
    Beginning,
    Middle,
    End,
}

impl fmt::Display for SizingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SizingStrategy::Beginning => "Beginning",
            SizingStrategy::Middle => "Middle",
            SizingStrategy::End => "End",
        };
        f.write_str(s)
    }
}

/// Accumulation order for `chunks` (already in document order).
///
/// Every chunk appears exactly once. This order only decides what gets
/// budget first; rendered output is re-sorted by index.
pub fn order_for_strategy(chunks: &[Chunk], strategy: SizingStrategy) -> Vec<Chunk> {
    match strategy {
        SizingStrategy::Beginning => chunks.to_vec(),
        SizingStrategy::End => chunks.iter().rev().cloned().collect(),
        SizingStrategy::Middle => middle_out(chunks),
    }
}

/// Middle chunk first, then alternately the next one right and the next one left.
fn middle_out(chunks: &[Chunk]) -> Vec<Chunk> {
    if chunks.len() <= 1 {
        return chunks.to_vec();
    }

    let middle = chunks.len() / 2;
    let mut ordered = Vec::with_capacity(chunks.len());
    ordered.push(chunks[middle].clone());

    let mut left = middle.checked_sub(1);
    let mut right = middle + 1;

    while ordered.len() < chunks.len() {
        if right < chunks.len() {
            ordered.push(chunks[right].clone());
            right += 1;
        }
        if let Some(l) = left {
            ordered.push(chunks[l].clone());
            left = l.checked_sub(1);
        }
    }

    ordered
}
