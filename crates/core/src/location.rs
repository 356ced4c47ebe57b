//! Warehouse location codes.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Code of a warehouse location (e.g. "A-01-3").
///
/// Codes come from the external store and are compared verbatim after
/// trimming surrounding whitespace. Ordering is lexicographic, which the
/// ledger relies on for deterministic tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCode(String);

impl LocationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty code marks an unresolved location and never matches a real one.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for LocationCode {}

impl core::fmt::Display for LocationCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        assert_eq!(LocationCode::new("  A-01 "), LocationCode::new("A-01"));
    }

    #[test]
    fn blank_code_is_empty() {
        assert!(LocationCode::new("   ").is_empty());
        assert!(!LocationCode::new("B-02").is_empty());
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(LocationCode::new("A-01") < LocationCode::new("B-01"));
    }
}
