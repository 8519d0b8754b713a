use std::collections::BTreeSet;

use tracing::debug;

use super::partial_text;
use crate::counter::UnitCounter;
use crate::types::Chunk;

/// Scores at or below this are treated as noise when no size limit is set.
pub const MIN_RELEVANCE_SCORE: f64 = 0.01;
/// Upper bound on matches kept by the relevance gate.
pub const MAX_RELEVANT_CHUNKS: usize = 5;
/// Matches kept when nothing clears [`MIN_RELEVANCE_SCORE`].
pub const FALLBACK_CHUNKS: usize = 2;

pub struct BudgetResult {
    pub selected: Vec<Chunk>,
    pub units_used: usize,
    pub chunks_truncated: usize,
}

/// `target` plus up to `before`/`after` neighbours by document position,
/// clipped to the ends of `all` and skipping indices already in `taken`.
pub fn context_candidates(
    target: &Chunk,
    position: usize,
    all: &[Chunk],
    before: usize,
    after: usize,
    taken: &BTreeSet<usize>,
) -> Vec<Chunk> {
    let start = position.saturating_sub(before);
    let end = (position + after).min(all.len().saturating_sub(1));

    let mut candidates = Vec::with_capacity(end.saturating_sub(start) + 1);
    for (offset, chunk) in all[start..=end].iter().enumerate() {
        if taken.contains(&chunk.index) {
            continue;
        }
        if start + offset == position {
            candidates.push(target.clone());
        } else {
            candidates.push(chunk.clone());
        }
    }
    candidates
}

/// Position of `chunk` in `all`, which is sorted by index.
pub fn position_of(all: &[Chunk], chunk: &Chunk) -> Option<usize> {
    all.binary_search_by_key(&chunk.index, |c| c.index).ok()
}

/// Accumulates chunks with their fixed-count context, in `ordered` order,
/// while the running total stays within `budget`. The first chunk that
/// overflows is cut to the exact remaining units and selection stops.
pub fn apply_budget(
    counter: &dyn UnitCounter,
    ordered: &[Chunk],
    all: &[Chunk],
    before: usize,
    after: usize,
    budget: usize,
) -> BudgetResult {
    let mut selected = Vec::new();
    let mut taken = BTreeSet::new();
    let mut units_used = 0;
    let mut chunks_truncated = 0;

    'outer: for target in ordered {
        if units_used >= budget {
            break;
        }
        let Some(position) = position_of(all, target) else {
            continue;
        };

        for candidate in context_candidates(target, position, all, before, after, &taken) {
            let units = counter.count(&candidate.text);
            if units_used + units <= budget {
                taken.insert(candidate.index);
                units_used += units;
                debug!(index = candidate.index, units, units_used, "added chunk with context");
                selected.push(candidate);
                continue;
            }

            let remaining = budget - units_used;
            let partial = partial_text(counter, &candidate.text, remaining);
            if !partial.is_empty() {
                let partial_units = counter.count(&partial);
                debug!(index = candidate.index, remaining, partial_units, "added partial chunk");
                taken.insert(candidate.index);
                units_used += partial_units;
                chunks_truncated += 1;
                selected.push(candidate.truncated(partial));
            }
            break 'outer;
        }
    }

    debug!(selected = selected.len(), units_used, budget, "fixed context selection complete");
    BudgetResult {
        selected,
        units_used,
        chunks_truncated,
    }
}

/// No size limit: every target in `ordered` with its context.
pub fn expand_all(
    counter: &dyn UnitCounter,
    ordered: &[Chunk],
    all: &[Chunk],
    before: usize,
    after: usize,
) -> BudgetResult {
    let mut selected = Vec::new();
    let mut taken = BTreeSet::new();

    for target in ordered {
        let Some(position) = position_of(all, target) else {
            continue;
        };
        for candidate in context_candidates(target, position, all, before, after, &taken) {
            taken.insert(candidate.index);
            selected.push(candidate);
        }
    }

    let units_used = selected.iter().map(|c| counter.count(&c.text)).sum();
    BudgetResult {
        selected,
        units_used,
        chunks_truncated: 0,
    }
}

/// Matches worth showing when a query is given without a size limit.
///
/// Keeps chunks scoring above [`MIN_RELEVANCE_SCORE`], at most half of them
/// (at least one) and never more than [`MAX_RELEVANT_CHUNKS`]. When none
/// clears the bar, the top [`FALLBACK_CHUNKS`] ranked chunks are used.
pub fn relevance_gate(ranked: &[Chunk]) -> Vec<Chunk> {
    let passing: Vec<&Chunk> = ranked
        .iter()
        .filter(|c| c.score > MIN_RELEVANCE_SCORE)
        .collect();

    let keep = (passing.len() / 2).max(1).min(MAX_RELEVANT_CHUNKS);
    let relevant: Vec<Chunk> = passing.into_iter().take(keep).cloned().collect();

    debug!(ranked = ranked.len(), relevant = relevant.len(), "relevance gate applied");

    if relevant.is_empty() {
        return ranked.iter().take(FALLBACK_CHUNKS).cloned().collect();
    }
    relevant
}
