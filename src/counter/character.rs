use super::{CountingMethod, ExactTruncation, UnitCounter};

/// Counts Unicode scalar values, not bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharCounter;

impl UnitCounter for CharCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn name(&self) -> &'static str {
        "characters"
    }

    fn method(&self) -> CountingMethod {
        CountingMethod::Characters
    }

    fn exact_truncation(&self) -> Option<&dyn ExactTruncation> {
        Some(self)
    }
}

impl ExactTruncation for CharCounter {
    fn create_partial_text(&self, text: &str, max_units: usize) -> String {
        if max_units == 0 || text.is_empty() {
            return String::new();
        }
        match text.char_indices().nth(max_units) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text.to_string(),
        }
    }
}
