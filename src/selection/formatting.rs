use crate::types::Chunk;

/// Inserted between non-adjacent chunks in search results.
pub const GAP_MARKER: &str = "\n\n---\n\n";
/// Longest run of duplicated boundary words that is stripped.
pub const OVERLAP_LOOKBACK_WORDS: usize = 15;

const PARAGRAPH_BREAK: &str = "\n\n";
const LINE_BREAK: &str = "\n";
const SUBSTANTIAL_SENTENCE_CHARS: usize = 40;

/// Sorts `selected` by index (keeping the first copy of each index) and
/// joins it into the final text.
pub fn assemble(selected: &mut Vec<Chunk>, search_mode: bool) -> String {
    selected.sort_by_key(|c| c.index);
    selected.dedup_by_key(|c| c.index);

    let mut out = String::new();
    for (i, chunk) in selected.iter().enumerate() {
        let text = match i {
            0 => chunk.text.as_str(),
            _ => remove_overlap_prefix(&chunk.text, &selected[i - 1].text),
        };
        if text.trim().is_empty() {
            continue;
        }

        if i > 0 && !out.is_empty() {
            let previous = &selected[i - 1];
            if search_mode && chunk.index != previous.index + 1 {
                out.push_str(GAP_MARKER);
            } else {
                out.push_str(separator_for(&previous.text));
            }
        }
        out.push_str(text);
    }
    out
}

/// Separator to place after `previous`.
///
/// Explicit trailing breaks are preserved. A short sentence is followed by a
/// line break; a long one, or a block with neither a break nor terminal
/// punctuation, by a blank line.
pub fn separator_for(previous: &str) -> &'static str {
    let trimmed = previous.trim();
    if trimmed.is_empty() {
        return PARAGRAPH_BREAK;
    }
    if previous.ends_with("\n\n") {
        return PARAGRAPH_BREAK;
    }
    if previous.ends_with('\n') {
        return LINE_BREAK;
    }
    if trimmed.ends_with(['.', '!', '?']) {
        if trimmed.chars().count() > SUBSTANTIAL_SENTENCE_CHARS {
            return PARAGRAPH_BREAK;
        }
        return LINE_BREAK;
    }
    PARAGRAPH_BREAK
}

/// Drops the leading words of `current` that repeat the trailing words of
/// `previous` (up to [`OVERLAP_LOOKBACK_WORDS`]). The rest of `current` keeps
/// its original formatting.
pub fn remove_overlap_prefix<'a>(current: &'a str, previous: &str) -> &'a str {
    let spans = word_spans(current);
    let previous_words: Vec<&str> = previous.split_whitespace().collect();
    if spans.is_empty() || previous_words.is_empty() {
        return current;
    }

    let max_check = spans
        .len()
        .min(previous_words.len())
        .min(OVERLAP_LOOKBACK_WORDS);

    for n in (1..=max_check).rev() {
        let tail = &previous_words[previous_words.len() - n..];
        let head = spans[..n].iter().map(|&(start, end)| &current[start..end]);
        if head.eq(tail.iter().copied()) {
            let (_, end) = spans[n - 1];
            return current[end..].trim_start();
        }
    }
    current
}

/// Byte ranges of whitespace-separated words.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}
