use tracing::debug;

use super::packing::{char_len, merge_short_segments, minimum_chunk_size, pack_words, trim_spaces_only};
use super::strategy::{Reattach, SplitStrategy, CASCADE};

/// Splits `text` into ordered chunks of at most `max_chunk_size` characters.
///
/// The cascade in [`CASCADE`] runs wave by wave; a chunk that fits after a
/// wave is kept in place and never touched by a finer wave. A chunk still
/// oversized after the word wave (one unbroken token) is emitted intact.
pub fn split_text(text: &str, max_chunk_size: usize) -> Vec<String> {
    debug!(text_len = text.len(), max_chunk_size, "split_text called");

    if max_chunk_size == 0 || text.trim().is_empty() {
        return Vec::new();
    }

    let text = trim_spaces_only(text);
    if char_len(text) <= max_chunk_size {
        return vec![text.to_string()];
    }

    let fits = |chunk: &str| char_len(chunk) <= max_chunk_size;
    let mut chunks = vec![text.to_string()];

    for strategy in CASCADE.iter() {
        if chunks.iter().all(|c| fits(c.as_str())) {
            break;
        }

        let oversized = chunks.iter().filter(|c| !fits(c.as_str())).count();
        debug!(strategy = strategy.name, oversized, "applying split strategy");

        chunks = chunks
            .into_iter()
            .flat_map(|chunk| {
                if fits(chunk.as_str()) {
                    vec![chunk]
                } else {
                    split_by_delimiter(&chunk, strategy, max_chunk_size)
                        .into_iter()
                        .filter_map(|sub| {
                            let trimmed = trim_spaces_only(&sub);
                            (!trimmed.trim().is_empty()).then(|| trimmed.to_string())
                        })
                        .collect()
                }
            })
            .collect();
    }

    debug!(chunk_count = chunks.len(), "split_text completed");
    chunks
}

fn split_by_delimiter(text: &str, strategy: &SplitStrategy, max_chunk_size: usize) -> Vec<String> {
    let parts = strategy.split(text);
    if parts.len() == 1 {
        return vec![text.to_string()];
    }

    let last = parts.len() - 1;
    let suffix = strategy.reattach.suffix();

    let segments: Vec<String> = parts
        .iter()
        .enumerate()
        .filter_map(|(i, part)| {
            let trimmed = trim_spaces_only(part);
            if trimmed.trim().is_empty() {
                // A doubled delimiter ("a. . b") still consumed a mark; it stands
                // alone and the merge pass folds it into a neighbour.
                return match strategy.reattach {
                    Reattach::Sentence(mark) if i < last => Some(mark.to_string()),
                    _ => None,
                };
            }
            match &suffix {
                Some(suffix) if i < last => Some(format!("{trimmed}{suffix}")),
                _ => Some(trimmed.to_string()),
            }
        })
        .collect();

    debug!(
        strategy = strategy.name,
        parts = parts.len(),
        segments = segments.len(),
        "split by delimiter"
    );

    match strategy.reattach {
        Reattach::Word => pack_words(segments, max_chunk_size),
        _ => merge_short_segments(segments, max_chunk_size, minimum_chunk_size(max_chunk_size)),
    }
}
