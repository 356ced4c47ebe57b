//! `stockroom-catalog` — products and warehouse locations mirrored from the
//! external store.
//!
//! The catalog is a read model: the external repositories own these records,
//! the core derives from them and mutates per-location stock only through
//! movement completion.

pub mod location;
pub mod location_stock;
pub mod named_ref;
pub mod product;

pub use location::WarehouseLocation;
pub use location_stock::LocationStock;
pub use named_ref::NamedRef;
pub use product::{Product, StockStatus};
