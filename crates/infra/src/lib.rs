//! `stockroom-infra` — repository contracts, the in-memory snapshot, and the
//! movement service that orchestrates them.
//!
//! The external store owns products, locations, and movements; this crate
//! mirrors them into a [`snapshot::WarehouseSnapshot`] and funnels every
//! ledger-affecting mutation through [`service::MovementService`].

pub mod error;
pub mod memory;
pub mod repository;
pub mod service;
pub mod snapshot;
pub mod storage;

pub use error::{ServiceError, TransportError};
pub use memory::{InMemoryLocationRepository, InMemoryMovementRepository, InMemoryProductRepository};
pub use repository::{
    Envelope, LocationRepository, MovementPatch, MovementRepository, Pagination, ProductRepository,
    QueryParams,
};
pub use service::MovementService;
pub use snapshot::WarehouseSnapshot;
pub use storage::JsonFileStorage;

#[cfg(test)]
mod integration_tests;
