//! Canonical numeric card identifiers (passcodes)

use crate::error::LookupError;
use std::fmt;
use std::str::FromStr;

/// A card's numeric identifier, kept as the digit string used by the API,
/// the card databases and the `.conf` files alike.
///
/// Ordering is plain string ordering, which is what sorted list output uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(String);

impl CardId {
    /// Parse a trimmed, non-empty, all-digit string.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value for SQLite binding; `None` if it does not fit an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<u64> for CardId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for CardId {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardId::parse(s).ok_or_else(|| LookupError::InvalidCardId(s.to_string()))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
