//! Field-level filter predicates shared by every category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::NamedRef;

/// Case-insensitive substring match. An empty filter always passes.
pub fn text_matches(filter: &str, value: &str) -> bool {
    let needle = filter.trim();
    if needle.is_empty() {
        return true;
    }
    value.to_lowercase().contains(&needle.to_lowercase())
}

/// A text field constrains matching only when non-blank.
pub fn text_active(filter: &str) -> bool {
    !filter.trim().is_empty()
}

/// Multi-select membership. An empty selection passes everything.
pub fn set_matches<T: PartialEq>(selection: &[T], value: &T) -> bool {
    selection.is_empty() || selection.contains(value)
}

/// Identifier-or-name match for category/supplier style references.
///
/// The stored filter value may be a reference id or free text; free text
/// matches when the reference's display name contains it. A record without
/// the reference fails any active filter on it.
pub fn ref_matches(filter: &str, reference: Option<&NamedRef>) -> bool {
    let needle = filter.trim();
    if needle.is_empty() {
        return true;
    }
    match reference {
        Some(r) => {
            r.id == needle
                || (!r.name.is_empty() && r.name.to_lowercase().contains(&needle.to_lowercase()))
        }
        None => false,
    }
}

/// Numeric range with independently optional bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter<T> {
    #[serde(default = "Option::default")]
    pub min: Option<T>,
    #[serde(default = "Option::default")]
    pub max: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self { min: None, max: None }
    }
}

impl<T: PartialOrd + Copy> RangeFilter<T> {
    pub fn at_least(min: T) -> Self {
        Self { min: Some(min), max: None }
    }

    pub fn at_most(max: T) -> Self {
        Self { min: None, max: Some(max) }
    }

    pub fn between(min: T, max: T) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn matches(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Inclusive date range with `dd.mm.yyyy` bounds as the user typed them.
///
/// Bounds stay raw strings so a frozen preset round-trips exactly; an
/// unparseable bound is treated as absent at match time, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }

    /// Active as soon as either bound is non-blank, parseable or not —
    /// the active-field count reflects what the user filled in.
    pub fn is_active(&self) -> bool {
        text_active(&self.from) || text_active(&self.to)
    }

    /// True when `at` falls inside the parseable bounds.
    ///
    /// The lower bound compares from the start of its day, the upper bound
    /// through the end of its day (23:59:59), both inclusive, in UTC.
    pub fn matches(&self, at: DateTime<Utc>) -> bool {
        if let Some(start) = parse_day(&self.from).and_then(start_of_day) {
            if at < start {
                return false;
            }
        }
        if let Some(end) = parse_day(&self.to).and_then(end_of_day) {
            if at > end {
                return false;
            }
        }
        true
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(s, "%d.%m.%Y") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(bound = %s, "unparseable date bound treated as absent");
            None
        }
    }
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc())
}
