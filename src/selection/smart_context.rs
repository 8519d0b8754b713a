//! Budget-aware context windows biased by the matched chunk's structure.
//!
//! A matched chunk is classified into a [`FieldType`] with a handful of
//! Markdown checks. Each field type maps to a [`ContextStrategy`] that
//! decides how the leftover budget is split between the chunks before and
//! after the match.

use std::collections::BTreeSet;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::partial_text;
use crate::counter::UnitCounter;
use crate::types::Chunk;

/// Dominant structural role of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Markdown header, level 1 to 6.
    Header(u8),
    ListItem,
    Code,
    Bold,
    Italic,
    Body,
}

impl FieldType {
    pub fn context_strategy(&self) -> ContextStrategy {
        match self {
            FieldType::Header(_) => ContextStrategy::HEADER_FOLLOWING,
            FieldType::ListItem => ContextStrategy::LIST_PRECEDING,
            FieldType::Code => ContextStrategy::CODE_FOLLOWING,
            FieldType::Bold => ContextStrategy::EMPHASIS_PRECEDING,
            FieldType::Italic | FieldType::Body => ContextStrategy::BALANCED,
        }
    }
}

/// Share of the context budget spent before and after a match.
/// `before_ratio + after_ratio == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContextStrategy {
    pub before_ratio: f64,
    pub after_ratio: f64,
    pub name: &'static str,
}

impl ContextStrategy {
    pub const HEADER_FOLLOWING: Self = Self {
        before_ratio: 0.2,
        after_ratio: 0.8,
        name: "header-following",
    };
    pub const LIST_PRECEDING: Self = Self {
        before_ratio: 0.8,
        after_ratio: 0.2,
        name: "list-preceding",
    };
    pub const CODE_FOLLOWING: Self = Self {
        before_ratio: 0.3,
        after_ratio: 0.7,
        name: "code-following",
    };
    pub const EMPHASIS_PRECEDING: Self = Self {
        before_ratio: 0.65,
        after_ratio: 0.35,
        name: "emphasis-preceding",
    };
    pub const BALANCED: Self = Self {
        before_ratio: 0.5,
        after_ratio: 0.5,
        name: "balanced",
    };
}

/// Compiled structural patterns. Built once and shared by reference
/// (`Arc<FieldPatterns>`) between selectors.
#[derive(Debug)]
pub struct FieldPatterns {
    header: Regex,
    bullet_list: Regex,
    numbered_list: Regex,
    code_fence: Regex,
    inline_code: Regex,
    bold: Regex,
    italic: Regex,
}

impl FieldPatterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            header: Regex::new(r"^(#{1,6})\s+")?,
            bullet_list: Regex::new(r"^[-*+]\s+")?,
            numbered_list: Regex::new(r"^\d+\.\s+")?,
            code_fence: Regex::new(r"(?m)^\s*```")?,
            inline_code: Regex::new(r"`[^`]+`")?,
            bold: Regex::new(r"\*\*[^*\s][^*]*[^*\s]\*\*|\*\*[^*\s]\*\*")?,
            italic: Regex::new(
                r"(?:^|[^*])\*[^*\s][^*]*[^*\s]\*(?:[^*]|$)|(?:^|[^*])\*[^*\s]\*(?:[^*]|$)",
            )?,
        })
    }

    /// Most specific match wins: header, list, code, bold, italic, body.
    pub fn classify(&self, chunk: &str) -> FieldType {
        let trimmed = chunk.trim();
        if trimmed.is_empty() {
            return FieldType::Body;
        }

        if let Some(caps) = self.header.captures(trimmed) {
            // the pattern bounds the run to 1..=6
            return FieldType::Header(caps[1].len() as u8);
        }
        if self.bullet_list.is_match(trimmed) || self.numbered_list.is_match(trimmed) {
            return FieldType::ListItem;
        }
        if self.code_fence.is_match(chunk) || self.inline_code.is_match(chunk) {
            return FieldType::Code;
        }
        if self.bold.is_match(chunk) {
            return FieldType::Bold;
        }
        if self.italic.is_match(chunk) {
            return FieldType::Italic;
        }
        FieldType::Body
    }
}

/// Chunks chosen around one match: target first, then preceding context in
/// reading order, then following context.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    pub chunks: Vec<Chunk>,
    pub units: usize,
    pub field_type: FieldType,
    pub strategy: ContextStrategy,
}

pub struct ContextCalculator<'a> {
    counter: &'a dyn UnitCounter,
    patterns: &'a FieldPatterns,
}

impl<'a> ContextCalculator<'a> {
    pub fn new(counter: &'a dyn UnitCounter, patterns: &'a FieldPatterns) -> Self {
        Self { counter, patterns }
    }

    /// Builds the window for `target`, which sits at `position` in `all`
    /// (document order), spending at most `budget` units. Indices in `taken`
    /// are skipped without being charged.
    pub fn window(
        &self,
        target: &Chunk,
        position: usize,
        all: &[Chunk],
        budget: usize,
        taken: &BTreeSet<usize>,
    ) -> ContextWindow {
        let field_type = self.patterns.classify(&target.text);
        let strategy = field_type.context_strategy();
        let target_units = self.counter.count(&target.text);

        if target_units >= budget {
            let chunk = if target_units > budget {
                target.truncated(partial_text(self.counter, &target.text, budget))
            } else {
                target.clone()
            };
            let units = self.counter.count(&chunk.text);
            return ContextWindow {
                chunks: vec![chunk],
                units,
                field_type,
                strategy,
            };
        }

        let available = budget - target_units;
        let before_budget = (available as f64 * strategy.before_ratio) as usize;
        let after_budget = available - before_budget;

        let (mut before, before_units) =
            self.collect(all, (0..position).rev(), before_budget, taken);
        before.reverse();
        let (after, after_units) =
            self.collect(all, position + 1..all.len(), after_budget, taken);

        debug!(
            target = target.index,
            strategy = strategy.name,
            target_units,
            before_units,
            after_units,
            before_budget,
            after_budget,
            "context distribution"
        );

        let mut chunks = Vec::with_capacity(1 + before.len() + after.len());
        chunks.push(target.clone());
        chunks.extend(before);
        chunks.extend(after);

        ContextWindow {
            chunks,
            units: target_units + before_units + after_units,
            field_type,
            strategy,
        }
    }

    /// Walks `positions` outward accumulating whole chunks while they fit; a
    /// chunk that does not fit is cut to the exact remaining units and ends the walk.
    fn collect(
        &self,
        all: &[Chunk],
        positions: impl Iterator<Item = usize>,
        mut budget: usize,
        taken: &BTreeSet<usize>,
    ) -> (Vec<Chunk>, usize) {
        let mut picked = Vec::new();
        let mut units = 0;

        for position in positions {
            if budget == 0 {
                break;
            }
            let chunk = &all[position];
            if taken.contains(&chunk.index) {
                continue;
            }

            let cost = self.counter.count(&chunk.text);
            if cost <= budget {
                picked.push(chunk.clone());
                units += cost;
                budget -= cost;
            } else {
                let partial = partial_text(self.counter, &chunk.text, budget);
                if !partial.is_empty() {
                    units += self.counter.count(&partial);
                    picked.push(chunk.truncated(partial));
                }
                break;
            }
        }

        (picked, units)
    }
}
