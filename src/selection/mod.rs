pub mod budgeting;
pub mod formatting;
pub mod ordering;
pub mod ranking;
pub mod smart_context;

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::counter::{SharedCounter, UnitCounter};
use crate::relevance::Corpus;
use crate::types::context_bundle::{SelectionMetadata, SelectionMode, SelectionResult};
use crate::types::{Chunk, Query};

pub use budgeting::{apply_budget, expand_all, relevance_gate, BudgetResult};
pub use formatting::{assemble, remove_overlap_prefix, separator_for, GAP_MARKER};
pub use ordering::{order_for_strategy, SizingStrategy};
pub use ranking::{rank_chunks, Scorer};
pub use smart_context::{ContextCalculator, ContextStrategy, ContextWindow, FieldPatterns, FieldType};

/// Search-mode fixed context when none is configured.
pub const DEFAULT_SEARCH_CONTEXT: (usize, usize) = (1, 2);
/// Smart context budget used when `context_units` is 0.
pub const DEFAULT_SMART_CONTEXT_UNITS: usize = 200;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("Failed to compile field patterns: {0}")]
    Patterns(#[from] regex::Error),
}

/// How much surrounding text accompanies each ordered chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "policy")]
pub enum ContextPolicy {
    /// 1 before / 2 after in search mode, none in strategy mode.
    #[default]
    Default,
    Fixed { before: usize, after: usize },
    /// Budget-aware, field-biased windows; search mode only.
    Smart { context_units: usize },
}

impl ContextPolicy {
    /// Fixed chunk counts this policy resolves to.
    pub fn fixed_counts(&self, search_mode: bool) -> (usize, usize) {
        match self {
            ContextPolicy::Fixed { before, after } => (*before, *after),
            _ if search_mode => DEFAULT_SEARCH_CONTEXT,
            _ => (0, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Overall output limit in counter units; 0 means no limit.
    pub max_units: usize,
    pub strategy: SizingStrategy,
    pub context: ContextPolicy,
}

impl SelectionConfig {
    pub fn new(max_units: usize, strategy: SizingStrategy) -> Self {
        Self {
            max_units,
            strategy,
            context: ContextPolicy::Default,
        }
    }

    pub fn with_context(mut self, context: ContextPolicy) -> Self {
        self.context = context;
        self
    }
}

/// Orders, expands and assembles chunks into one bounded string.
pub struct ContextSelector {
    counter: SharedCounter,
    patterns: Arc<FieldPatterns>,
}

impl ContextSelector {
    pub fn new(counter: SharedCounter) -> Result<Self, SelectorError> {
        Ok(Self::with_patterns(counter, Arc::new(FieldPatterns::new()?)))
    }

    /// Reuses an already compiled pattern table.
    pub fn with_patterns(counter: SharedCounter, patterns: Arc<FieldPatterns>) -> Self {
        Self { counter, patterns }
    }

    pub fn counter(&self) -> &dyn UnitCounter {
        self.counter.as_ref()
    }

    pub fn patterns(&self) -> &Arc<FieldPatterns> {
        &self.patterns
    }

    /// Selects from `chunks` under `config`. A non-blank `query` switches to
    /// search mode (relevance order, discontinuity markers).
    ///
    /// Never fails; an empty chunk list yields an empty result.
    pub fn select(
        &self,
        chunks: &[Chunk],
        query: Option<&Query>,
        config: &SelectionConfig,
    ) -> SelectionResult {
        let counter = self.counter.as_ref();

        let mut all = chunks.to_vec();
        all.sort_by_key(|c| c.index);
        all.dedup_by_key(|c| c.index);

        let query = query.filter(|q| !q.is_blank());
        let search_mode = query.is_some();

        let ordered = match query {
            Some(q) => {
                let corpus = Corpus::new(all.iter().map(|c| c.text.as_str()));
                rank_chunks(&corpus, q, &all)
            }
            None => order_for_strategy(&all, config.strategy),
        };

        debug!(
            chunks = all.len(),
            search_mode,
            max_units = config.max_units,
            context = ?config.context,
            "starting chunk selection"
        );

        let (outcome, budget) = match config.context {
            ContextPolicy::Smart { context_units } if search_mode => {
                let budget = if context_units > 0 {
                    context_units
                } else {
                    DEFAULT_SMART_CONTEXT_UNITS
                };
                (self.select_smart(&ordered, &all, budget), budget)
            }
            policy => {
                let (before, after) = policy.fixed_counts(search_mode);
                let outcome = if config.max_units > 0 {
                    apply_budget(counter, &ordered, &all, before, after, config.max_units)
                } else if search_mode {
                    let relevant = relevance_gate(&ordered);
                    expand_all(counter, &relevant, &all, before, after)
                } else {
                    expand_all(counter, &ordered, &all, before, after)
                };
                (outcome, config.max_units)
            }
        };

        let BudgetResult {
            mut selected,
            units_used,
            chunks_truncated,
        } = outcome;
        let text = assemble(&mut selected, search_mode);

        let selection = SelectionMetadata {
            query: query.map(|q| q.raw.clone()),
            mode: if search_mode {
                SelectionMode::Search
            } else {
                SelectionMode::Strategy
            },
            strategy: config.strategy,
            counting_method: counter.method(),
            budget,
            units_used,
            chunks_considered: all.len(),
            chunks_selected: selected.len(),
            chunks_truncated,
        };

        SelectionResult {
            text,
            chunks: selected,
            selection,
        }
    }

    /// One running budget shared by every match; each match gets a smart
    /// window sized from what is left.
    fn select_smart(&self, ordered: &[Chunk], all: &[Chunk], budget: usize) -> BudgetResult {
        let counter = self.counter.as_ref();
        let calculator = ContextCalculator::new(counter, &self.patterns);

        let mut selected = Vec::new();
        let mut taken = BTreeSet::new();
        let mut units_used = 0;
        let mut chunks_truncated = 0;

        'outer: for target in ordered {
            if taken.contains(&target.index) {
                continue;
            }
            let remaining = budget.saturating_sub(units_used);
            if remaining == 0 {
                break;
            }
            let Some(position) = budgeting::position_of(all, target) else {
                continue;
            };

            let window = calculator.window(target, position, all, remaining, &taken);
            debug!(
                target = target.index,
                strategy = window.strategy.name,
                field_type = ?window.field_type,
                units = window.units,
                remaining,
                "smart context calculated"
            );

            for chunk in window.chunks {
                if taken.contains(&chunk.index) {
                    continue;
                }
                let units = counter.count(&chunk.text);
                if units_used + units <= budget {
                    if is_truncated(all, &chunk) {
                        chunks_truncated += 1;
                    }
                    taken.insert(chunk.index);
                    units_used += units;
                    selected.push(chunk);
                    continue;
                }

                let partial = partial_text(counter, &chunk.text, budget - units_used);
                if !partial.is_empty() {
                    taken.insert(chunk.index);
                    units_used += counter.count(&partial);
                    chunks_truncated += 1;
                    selected.push(chunk.truncated(partial));
                }
                break 'outer;
            }

            if units_used >= budget {
                break;
            }
        }

        BudgetResult {
            selected,
            units_used,
            chunks_truncated,
        }
    }
}

fn is_truncated(all: &[Chunk], chunk: &Chunk) -> bool {
    budgeting::position_of(all, chunk).is_some_and(|p| all[p].text != chunk.text)
}

/// Cuts `text` to at most `remaining` units.
///
/// Counters with the [`ExactTruncation`](crate::counter::ExactTruncation)
/// capability hit the limit exactly; others get a proportional character cut
/// that shrinks until it fits.
pub fn partial_text(counter: &dyn UnitCounter, text: &str, remaining: usize) -> String {
    if remaining == 0 || text.is_empty() {
        return String::new();
    }
    if let Some(exact) = counter.exact_truncation() {
        return exact.create_partial_text(text, remaining);
    }

    let units = counter.count(text);
    if units <= remaining {
        return text.to_string();
    }

    let total_chars = text.chars().count();
    let mut keep = (total_chars as f64 * remaining as f64 / units as f64) as usize;
    while keep > 0 {
        let prefix = match text.char_indices().nth(keep) {
            Some((cut, _)) => &text[..cut],
            None => text,
        };
        if counter.count(prefix) <= remaining {
            return prefix.trim_end().to_string();
        }
        keep -= 1;
    }
    String::new()
}
