//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two with the
/// same attributes are the same value. `LocationCode` is the canonical
/// example here: "A-01" equals "A-01" regardless of which record carried it.
/// To "modify" one, build a new value.
///
/// The bounds keep value objects cheap to copy, comparable, and debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
