use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, LocationCode, MovementId, ProductId, UserId};

use crate::movement::{MovementRecord, MovementStatus};

/// Request to move a product quantity between two locations.
///
/// The caller supplies the initial status: `Draft`/`Pending` for multi-step
/// flows, `Completed` for single-step transfers that apply immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub from_location: LocationCode,
    pub to_location: LocationCode,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub initial_status: MovementStatus,
}

impl TransferRequest {
    /// Intrinsic validation, checked before any repository call.
    ///
    /// Resolution against the location snapshot (do both codes exist, is
    /// there enough stock at the source) is the engine's job; this covers
    /// everything the request alone can tell.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self.from_location.is_empty() || self.to_location.is_empty() {
            return Err(DomainError::validation(
                "source and destination locations are required",
            ));
        }
        if self.from_location == self.to_location {
            return Err(DomainError::validation(
                "source and destination must differ",
            ));
        }
        Ok(())
    }

    /// Materialize the movement record the repository is asked to create.
    pub fn to_record(
        &self,
        id: MovementId,
        user_id: Option<UserId>,
        occurred_at: DateTime<Utc>,
    ) -> MovementRecord {
        MovementRecord {
            id,
            product_id: self.product_id,
            quantity: self.quantity,
            from_location: self.from_location.clone(),
            to_location: self.to_location.clone(),
            status: self.initial_status,
            batch_number: self.batch_number.clone(),
            user_id,
            occurred_at,
            notes: self.notes.clone(),
        }
    }
}
