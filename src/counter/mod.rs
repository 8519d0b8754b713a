//! Unit measurement: tokens, words or characters.
//!
//! Every budget in the crate is expressed in the units of one [`UnitCounter`].
//! Counters that can cut text to an exact unit count expose that through the
//! [`ExactTruncation`] capability instead of callers probing concrete types.

pub mod character;
pub mod token;
pub mod word;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use character::CharCounter;
pub use token::TokenCounter;
pub use word::WordCounter;

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("Failed to load token encoding {encoding}: {reason}")]
    EncodingLoad { encoding: &'static str, reason: String },
    #[error("Unknown counting method: {0}")]
    UnknownMethod(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountingMethod {
    #[default]
    Tokens,
    Words,
    Characters,
}

impl fmt::Display for CountingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CountingMethod::Tokens => "tokens",
            CountingMethod::Words => "words",
            CountingMethod::Characters => "characters",
        };
        f.write_str(s)
    }
}

impl FromStr for CountingMethod {
    type Err = CounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tokens" | "token" => Ok(CountingMethod::Tokens),
            "words" | "word" => Ok(CountingMethod::Words),
            "characters" | "chars" | "character" => Ok(CountingMethod::Characters),
            other => Err(CounterError::UnknownMethod(other.to_string())),
        }
    }
}

/// Measures text size in one unit system.
///
/// `count` never fails; an empty string is always 0 units.
pub trait UnitCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;

    fn name(&self) -> &'static str;

    fn method(&self) -> CountingMethod;

    /// Narrow capability for counters that can cut text to an exact unit count.
    fn exact_truncation(&self) -> Option<&dyn ExactTruncation> {
        None
    }
}

/// Cuts text to a prefix measuring exactly `max_units`.
///
/// Contract:
/// - `max_units == 0` or empty text yields `""`
/// - text already within `max_units` is returned unchanged
/// - otherwise the returned prefix counts exactly `max_units`, or when no
///   character boundary lands there (a multi-token emoji), the longest prefix
///   under it
pub trait ExactTruncation {
    fn create_partial_text(&self, text: &str, max_units: usize) -> String;
}

/// Shared handle passed to the selector and pipeline.
pub type SharedCounter = Arc<dyn UnitCounter>;

/// Builds the counter for `method`. Only the token counter can fail (vocabulary load).
pub fn new_counter(method: CountingMethod) -> Result<SharedCounter, CounterError> {
    let counter: SharedCounter = match method {
        CountingMethod::Tokens => Arc::new(TokenCounter::new()?),
        CountingMethod::Words => Arc::new(WordCounter),
        CountingMethod::Characters => Arc::new(CharCounter),
    };
    Ok(counter)
}
