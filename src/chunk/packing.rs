/// Length in Unicode scalar values; all splitter budgets use this measure.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Strips spaces and tabs only, leaving intentional line breaks in place.
pub fn trim_spaces_only(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

/// Segments shorter than this are merged into a neighbour when possible.
pub fn minimum_chunk_size(max_chunk_size: usize) -> usize {
    (max_chunk_size / 4).max(3)
}

fn join_segments(left: &str, right: &str) -> String {
    if left.ends_with('\n') {
        format!("{left}{right}")
    } else {
        format!("{left} {right}")
    }
}

/// Greedy left-to-right packing of words, flushing before a word would overflow.
pub fn pack_words(words: Vec<String>, max_chunk_size: usize) -> Vec<String> {
    let mut packed = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in words {
        let word_len = char_len(&word);
        let needed = if current.is_empty() { word_len } else { word_len + 1 };

        if !current.is_empty() && current_len + needed > max_chunk_size {
            let flushed = trim_spaces_only(&current);
            if !flushed.is_empty() {
                packed.push(flushed.to_string());
            }
            current.clear();
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&word);
        current_len += word_len;
    }

    let flushed = trim_spaces_only(&current);
    if !flushed.is_empty() {
        packed.push(flushed.to_string());
    }
    packed
}

/// Folds short segments into the following segment, or failing that into
/// the previous result, as long as the combination stays within budget.
pub fn merge_short_segments(
    mut segments: Vec<String>,
    max_chunk_size: usize,
    min_chunk_size: usize,
) -> Vec<String> {
    if segments.len() <= 1 {
        return segments;
    }

    let mut merged: Vec<String> = Vec::with_capacity(segments.len());
    let mut i = 0;

    while i < segments.len() {
        let current = std::mem::take(&mut segments[i]);

        if char_len(&current) >= min_chunk_size {
            merged.push(current);
            i += 1;
            continue;
        }

        if i + 1 < segments.len() {
            let combined = join_segments(&current, &segments[i + 1]);
            if char_len(&combined) <= max_chunk_size {
                segments[i + 1] = combined;
                i += 1;
                continue;
            }
        }

        if let Some(last) = merged.last_mut() {
            let combined = join_segments(last, &current);
            if char_len(&combined) <= max_chunk_size {
                *last = combined;
                i += 1;
                continue;
            }
        }

        merged.push(current);
        i += 1;
    }

    merged
}
