//! Identifier types for records held by the host store.
//!
//! Record ids are positive integers. Zero is the host's "no record" value and
//! is never a valid [`RecordId`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::Error;

/// Unique identifier for a record in the host store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(NonZeroU64);

impl RecordId {
    /// Creates a record id, returning `None` for zero.
    #[must_use]
    pub const fn new(id: u64) -> Option<Self> {
        match NonZeroU64::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0.get()
    }

    /// Coerces untrusted form input into a record id.
    ///
    /// Applies [`absint`] first, so `"12abc"` yields 12 and anything that
    /// coerces to zero yields `None`.
    #[must_use]
    pub fn from_input(input: &str) -> Option<Self> {
        Self::new(absint(input))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidId(s.to_string()))?;
        Self::new(raw).ok_or_else(|| Error::InvalidId(s.to_string()))
    }
}

impl From<RecordId> for u64 {
    fn from(id: RecordId) -> Self {
        id.get()
    }
}

/// Coerces a string to a non-negative integer the way the host sanitizes ids.
///
/// Leading whitespace is skipped, an optional sign is accepted, and the
/// longest run of digits that follows is parsed. Input without leading digits
/// is 0. Negative values clamp to 0, and values too large for `u64` saturate.
#[must_use]
pub fn absint(input: &str) -> u64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &rest[..digits_len];
    if digits.is_empty() || negative {
        return 0;
    }

    digits.parse().unwrap_or(u64::MAX)
}
