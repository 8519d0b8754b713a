use std::sync::{PoisonError, RwLock};

use tiktoken_rs::CoreBPE;
use tracing::debug;

use super::{CounterError, CountingMethod, ExactTruncation, UnitCounter};

const ENCODING: &str = "cl100k_base";
/// Character boundaries re-checked behind the binary-search result.
const BOUNDARY_WINDOW: usize = 16;
/// How far past the limit the forward scan tolerates before stopping.
const BOUNDARY_WINDOW_UNITS: usize = 2;

/// Subword token counter over the cl100k_base vocabulary.
///
/// The encoding handle sits behind a reader-writer lock so independent
/// callers can count concurrently through a shared reference.
pub struct TokenCounter {
    encoding: RwLock<CoreBPE>,
}

impl TokenCounter {
    pub fn new() -> Result<Self, CounterError> {
        debug!(encoding = ENCODING, "initializing token counter");
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| CounterError::EncodingLoad {
            encoding: ENCODING,
            reason: e.to_string(),
        })?;
        Ok(Self {
            encoding: RwLock::new(bpe),
        })
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("encoding", &ENCODING)
            .finish()
    }
}

impl UnitCounter for TokenCounter {
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let bpe = self.encoding.read().unwrap_or_else(PoisonError::into_inner);
        bpe.encode_ordinary(text).len()
    }

    fn name(&self) -> &'static str {
        "tokens (cl100k_base)"
    }

    fn method(&self) -> CountingMethod {
        CountingMethod::Tokens
    }

    fn exact_truncation(&self) -> Option<&dyn ExactTruncation> {
        Some(self)
    }
}

impl ExactTruncation for TokenCounter {
    /// Cuts on character boundaries and re-counts each candidate: decoding a
    /// token-id prefix does not round-trip to the same count once text is
    /// re-encoded, and ids that split a multi-byte character cannot be decoded.
    fn create_partial_text(&self, text: &str, max_units: usize) -> String {
        if max_units == 0 || text.is_empty() {
            return String::new();
        }

        let bpe = self.encoding.read().unwrap_or_else(PoisonError::into_inner);
        let total = bpe.encode_ordinary(text).len();
        if total <= max_units {
            return text.to_string();
        }

        let cuts: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let count_at = |cut: usize| bpe.encode_ordinary(&text[..cuts[cut]]).len();

        // cuts[0] is empty (0 tokens), the last cut is the whole text (> max).
        let (mut lo, mut hi) = (0, cuts.len() - 1);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if count_at(mid) <= max_units {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        // Prefix counts are not strictly monotonic, so look around the
        // boundary for a cut that lands on `max_units` exactly.
        let mut best = (count_at(lo), lo);
        let window_start = lo.saturating_sub(BOUNDARY_WINDOW);
        for cut in (window_start..lo).chain(lo + 1..cuts.len()) {
            let units = count_at(cut);
            if cut > lo && units > max_units + BOUNDARY_WINDOW_UNITS {
                break;
            }
            if units <= max_units && (units, cut) > best {
                best = (units, cut);
            }
        }

        let (units, cut) = best;
        debug!(
            original_tokens = total,
            max_tokens = max_units,
            result_tokens = units,
            "created partial text"
        );
        text[..cuts[cut]].to_string()
    }
}
