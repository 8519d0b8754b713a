use super::{CountingMethod, ExactTruncation, UnitCounter};

/// Words are runs of non-whitespace separated by Unicode whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordCounter;

impl UnitCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    fn name(&self) -> &'static str {
        "words"
    }

    fn method(&self) -> CountingMethod {
        CountingMethod::Words
    }

    fn exact_truncation(&self) -> Option<&dyn ExactTruncation> {
        Some(self)
    }
}

impl ExactTruncation for WordCounter {
    fn create_partial_text(&self, text: &str, max_units: usize) -> String {
        if max_units == 0 || text.is_empty() {
            return String::new();
        }

        // Byte offset just past the `max_units`-th word; the prefix keeps the
        // original spacing between the words it contains.
        let mut words_seen = 0;
        let mut in_word = false;
        for (offset, ch) in text.char_indices() {
            if ch.is_whitespace() {
                if in_word {
                    in_word = false;
                    if words_seen == max_units {
                        return text[..offset].to_string();
                    }
                }
            } else if !in_word {
                in_word = true;
                words_seen += 1;
            }
        }

        text.to_string()
    }
}
