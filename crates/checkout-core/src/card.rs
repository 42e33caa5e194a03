//! # Card Numbers
//!
//! Opaque identifier for a payment instrument, taken verbatim from the request.
//! No format validation is applied here.

use serde::Deserialize;
use std::fmt;

/// Number of trailing characters left visible by [`CardNumber::masked`]
const VISIBLE_DIGITS: usize = 4;

/// A card number exactly as the caller supplied it
///
/// Deserialize only: nothing writes a full number back out.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, unmodified
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Log-safe form: every character but the last four replaced by `*`.
    pub fn masked(&self) -> String {
        let total = self.0.chars().count();
        let hidden = total.saturating_sub(VISIBLE_DIGITS);
        self.0
            .chars()
            .enumerate()
            .map(|(i, c)| if i < hidden { '*' } else { c })
            .collect()
    }
}

// Debug and Display both mask so a stray `{:?}` never leaks a full number.
impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
