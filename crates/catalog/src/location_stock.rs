//! Canonical per-location stock mapping.

use std::collections::BTreeMap;

use serde::de::{Deserialize, Deserializer};
use serde::Serialize;
use serde_json::Value;

use stockroom_core::{LocationCode, ValueObject};

/// Ordered mapping `location code -> quantity` for one product.
///
/// The external store delivers this in more than one shape (object of
/// numbers, numeric strings, occasionally garbage). Decoding is tolerant:
/// a malformed or negative entry degrades to 0 instead of failing the whole
/// record. Zero entries are never stored, so iteration only yields locations
/// that actually hold stock.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct LocationStock(BTreeMap<LocationCode, u64>);

impl LocationStock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(code, quantity)` pairs, clipping negative quantities to 0.
    pub fn from_entries(entries: impl IntoIterator<Item = (LocationCode, i64)>) -> Self {
        let mut stock = Self::new();
        for (code, qty) in entries {
            stock.set(code, qty.max(0) as u64);
        }
        stock
    }

    /// Tolerant decode from an arbitrary JSON value.
    ///
    /// Anything that is not an object decodes to an empty mapping.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            if !value.is_null() {
                tracing::debug!("ignoring non-object location stock payload");
            }
            return Self::new();
        };

        let mut stock = Self::new();
        for (code, raw) in map {
            stock.set(LocationCode::new(code.as_str()), coerce_quantity(raw));
        }
        stock
    }

    pub fn get(&self, code: &LocationCode) -> u64 {
        self.0.get(code).copied().unwrap_or(0)
    }

    /// Set the quantity at a location. Zero removes the entry.
    pub fn set(&mut self, code: LocationCode, quantity: u64) {
        if code.is_empty() || quantity == 0 {
            self.0.remove(&code);
        } else {
            self.0.insert(code, quantity);
        }
    }

    pub fn add(&mut self, code: LocationCode, quantity: u64) {
        let current = self.get(&code);
        self.set(code, current + quantity);
    }

    /// Remove up to `quantity` from a location, clipping at what is actually
    /// there. Returns the amount removed.
    pub fn remove_up_to(&mut self, code: &LocationCode, quantity: u64) -> u64 {
        let current = self.get(code);
        let removed = current.min(quantity);
        self.set(code.clone(), current - removed);
        removed
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in lexicographic code order.
    pub fn iter(&self) -> impl Iterator<Item = (&LocationCode, u64)> {
        self.0.iter().map(|(code, qty)| (code, *qty))
    }
}

impl ValueObject for LocationStock {}

impl<'de> Deserialize<'de> for LocationStock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl FromIterator<(LocationCode, u64)> for LocationStock {
    fn from_iter<I: IntoIterator<Item = (LocationCode, u64)>>(iter: I) -> Self {
        let mut stock = Self::new();
        for (code, qty) in iter {
            stock.set(code, qty);
        }
        stock
    }
}

fn coerce_quantity(raw: &Value) -> u64 {
    match raw {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else if let Some(i) = n.as_i64() {
                i.max(0) as u64
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                if f.is_finite() && f > 0.0 { f.trunc() as u64 } else { 0 }
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => i.max(0) as u64,
            Err(_) => {
                tracing::debug!(value = %s, "non-numeric location stock entry treated as 0");
                0
            }
        },
        other => {
            tracing::debug!(?other, "malformed location stock entry treated as 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn code(c: &str) -> LocationCode {
        LocationCode::new(c)
    }

    #[test]
    fn from_value_accepts_numbers_and_numeric_strings() {
        let stock = LocationStock::from_value(&json!({"A": 10, "B": "5"}));
        assert_eq!(stock.get(&code("A")), 10);
        assert_eq!(stock.get(&code("B")), 5);
        assert_eq!(stock.total(), 15);
    }

    #[test]
    fn from_value_degrades_garbage_to_zero() {
        let stock = LocationStock::from_value(&json!({"A": "lots", "B": null, "C": 3}));
        assert_eq!(stock.get(&code("A")), 0);
        assert_eq!(stock.get(&code("B")), 0);
        assert_eq!(stock.total(), 3);
    }

    #[test]
    fn from_value_ignores_non_object_payloads() {
        assert!(LocationStock::from_value(&json!([1, 2, 3])).is_empty());
        assert!(LocationStock::from_value(&Value::Null).is_empty());
    }

    #[test]
    fn negative_quantities_clip_to_zero() {
        let stock = LocationStock::from_entries([(code("A"), -4), (code("B"), 7)]);
        assert_eq!(stock.get(&code("A")), 0);
        assert_eq!(stock.get(&code("B")), 7);
        assert_eq!(stock.len(), 1);
    }

    #[test]
    fn remove_up_to_clips_and_prunes() {
        let mut stock = LocationStock::from_entries([(code("A"), 3)]);
        assert_eq!(stock.remove_up_to(&code("A"), 5), 3);
        assert!(stock.is_empty());
        assert_eq!(stock.remove_up_to(&code("A"), 1), 0);
    }

    #[test]
    fn zero_set_removes_entry() {
        let mut stock = LocationStock::from_entries([(code("A"), 3)]);
        stock.set(code("A"), 0);
        assert!(stock.is_empty());
    }

    proptest! {
        /// Property: the total always equals the sum of clipped entries, and
        /// no stored quantity is ever zero.
        #[test]
        fn total_matches_clipped_entries(entries in prop::collection::vec(("[A-D]", -100i64..100i64), 0..8)) {
            let stock = LocationStock::from_entries(
                entries.iter().map(|(c, q)| (LocationCode::new(c.as_str()), *q)),
            );

            prop_assert!(stock.iter().all(|(_, qty)| qty > 0));

            let mut expected: std::collections::BTreeMap<LocationCode, u64> = Default::default();
            for (c, q) in &entries {
                // from_entries overwrites per code, mirroring last-entry-wins.
                expected.insert(LocationCode::new(c.as_str()), (*q).max(0) as u64);
            }
            let expected_total: u64 = expected.values().sum();
            prop_assert_eq!(stock.total(), expected_total);
        }
    }
}
