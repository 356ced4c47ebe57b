//! `stockroom-filters` — the compound filter evaluator and its persistence.
//!
//! Each search category (products, movements, clients, financial) has its own
//! strongly-typed filter configuration; a record matches when every active
//! field matches (AND-composition). Saved presets and the bounded
//! recent-search history freeze these configurations into durable key-value
//! storage.

pub mod category;
pub mod config;
pub mod fields;
pub mod preset;
pub mod store;

pub use category::SearchCategory;
pub use config::{ClientFilter, FilterConfig, FilterSet, FinancialFilter, MovementFilter, ProductFilter};
pub use fields::{DateRange, RangeFilter};
pub use preset::{FilterPreset, RecentSearch};
pub use store::{MemoryStorage, PresetStore, StateStorage, PRESETS_KEY, RECENTS_KEY, RECENT_LIMIT};
