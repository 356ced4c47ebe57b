use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, LocationCode, MovementId, ProductId, UserId};

/// Movement record lifecycle.
///
/// Draft and pending records have not touched stock yet; completed is
/// terminal and marks the record's delta as applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementStatus {
    Draft,
    Pending,
    Completed,
}

impl MovementStatus {
    /// Draft and pending records still accept structural edits.
    pub fn is_open(&self) -> bool {
        matches!(self, MovementStatus::Draft | MovementStatus::Pending)
    }
}

/// One product quantity moved between two locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    /// Record identifier. A fetched payload missing its id decodes with a
    /// freshly generated one rather than failing the whole collection.
    #[serde(default)]
    pub id: MovementId,
    pub product_id: ProductId,
    /// Transfer amount, always positive.
    pub quantity: i64,
    pub from_location: LocationCode,
    pub to_location: LocationCode,
    pub status: MovementStatus,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

impl MovementRecord {
    /// Batch identifier this record belongs to.
    ///
    /// Falls back to the record's own id, which makes every un-grouped
    /// movement a singleton batch.
    pub fn batch_key(&self) -> String {
        match &self.batch_number {
            Some(number) if !number.trim().is_empty() => number.trim().to_string(),
            _ => self.id.to_string(),
        }
    }

    /// Transition to completed. Returns whether a transition happened;
    /// completing an already-completed record is a no-op.
    pub fn mark_completed(&mut self) -> bool {
        if self.status.is_open() {
            self.status = MovementStatus::Completed;
            true
        } else {
            false
        }
    }
}

impl Entity for MovementRecord {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
