//! External repository contracts.
//!
//! The transport itself (HTTP, IPC, ...) is a collaborator; these traits pin
//! down the envelope shape and the operations the core consumes. Every call
//! may suspend, and a failure is a [`TransportError`] surfaced verbatim.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stockroom_catalog::{NamedRef, Product, WarehouseLocation};
use stockroom_core::MovementId;
use stockroom_movements::{MovementRecord, MovementStatus};

use crate::error::TransportError;

/// Envelope every repository response arrives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default = "Option::default")]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            pagination: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// Listing parameters passed through to the external store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Partial update of a movement record.
///
/// Status patches drive batch completion; a notes-only patch is the
/// metadata amendment path that stays open after completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementPatch {
    #[serde(default)]
    pub status: Option<MovementStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MovementPatch {
    pub fn status(status: MovementStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait ProductRepository {
    async fn get_all(&self, params: &QueryParams) -> Result<Envelope<Vec<Product>>, TransportError>;

    async fn get_categories(&self) -> Result<Envelope<Vec<NamedRef>>, TransportError>;
}

#[async_trait]
pub trait LocationRepository {
    async fn get_all(
        &self,
        params: &QueryParams,
    ) -> Result<Envelope<Vec<WarehouseLocation>>, TransportError>;
}

#[async_trait]
pub trait MovementRepository {
    async fn get_all(
        &self,
        params: &QueryParams,
    ) -> Result<Envelope<Vec<MovementRecord>>, TransportError>;

    /// Create a movement; the store may reassign the identifier.
    async fn create(&self, record: MovementRecord) -> Result<MovementRecord, TransportError>;

    async fn update(
        &self,
        id: MovementId,
        patch: MovementPatch,
    ) -> Result<MovementRecord, TransportError>;

    async fn delete(&self, id: MovementId) -> Result<(), TransportError>;
}
