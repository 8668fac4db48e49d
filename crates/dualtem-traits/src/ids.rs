//! Identifier types used across the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Central-bank statistics series identifier (`idVariable`).
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(pub i64);

impl SeriesId {
    /// Create a new series ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw numeric ID.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SeriesId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Live market feed name, used as the provenance prefix (`arg_bonds`).
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedId(pub String);

impl FeedId {
    /// Create a new feed ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FeedId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FeedId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_id_serde_is_bare_number() {
        let json = serde_json::to_string(&SeriesId::new(44)).unwrap();
        assert_eq!(json, "44");
        assert_eq!(SeriesId::from(44).to_string(), "44");
    }

    #[test]
    fn test_feed_id() {
        let feed = FeedId::from("arg_bonds");
        assert_eq!(feed.as_str(), "arg_bonds");
        assert_eq!(format!("{feed}.last"), "arg_bonds.last");
    }
}
