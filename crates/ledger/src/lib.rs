//! `stockroom-ledger` — per-location stock derivations.
//!
//! Every function here is a pure read over the product/location snapshot;
//! the ledger has no mutation authority of its own.

pub mod ledger;

pub use ledger::{default_source_location, occupancy, quantity_at, utilization};
