//! Movement orchestration over the snapshot and the repositories.

use chrono::Utc;

use stockroom_core::{DomainError, LocationCode, MovementId, ProductId, UserId};
use stockroom_ledger::{default_source_location, quantity_at};
use stockroom_movements::{
    apply_delta, completion_deltas, edit_items, group_for_display, BatchGroup, BatchItem,
    MovementRecord, MovementStatus, StockDelta, TransferRequest,
};

use crate::error::{ServiceError, TransportError};
use crate::repository::{
    Envelope, LocationRepository, MovementPatch, MovementRepository, ProductRepository, QueryParams,
};
use crate::snapshot::WarehouseSnapshot;

/// The only component allowed to request ledger-affecting mutations.
///
/// Owns the in-memory snapshot; every operation validates against it before
/// touching a repository and mutates it only after the repository accepted
/// the change (fail closed).
pub struct MovementService<P, L, M> {
    products: P,
    locations: L,
    movements: M,
    snapshot: WarehouseSnapshot,
}

impl<P, L, M> MovementService<P, L, M>
where
    P: ProductRepository,
    L: LocationRepository,
    M: MovementRepository,
{
    pub fn new(products: P, locations: L, movements: M) -> Self {
        Self {
            products,
            locations,
            movements,
            snapshot: WarehouseSnapshot::new(),
        }
    }

    pub fn snapshot(&self) -> &WarehouseSnapshot {
        &self.snapshot
    }

    /// Refresh the product mirror. The result replaces the section wholesale;
    /// when two fetches race, the one resolving last wins.
    pub async fn load_products(&mut self) -> Result<(), ServiceError> {
        let data = accept(self.products.get_all(&QueryParams::default()).await?)?;
        self.snapshot.replace_products(data);
        Ok(())
    }

    pub async fn load_locations(&mut self) -> Result<(), ServiceError> {
        let data = accept(self.locations.get_all(&QueryParams::default()).await?)?;
        self.snapshot.replace_locations(data);
        Ok(())
    }

    pub async fn load_movements(&mut self) -> Result<(), ServiceError> {
        let data = accept(self.movements.get_all(&QueryParams::default()).await?)?;
        self.snapshot.replace_movements(data);
        Ok(())
    }

    pub async fn load_all(&mut self) -> Result<(), ServiceError> {
        self.load_products().await?;
        self.load_locations().await?;
        self.load_movements().await?;
        Ok(())
    }

    /// Location to pre-fill as the "from" side of a new transfer.
    pub fn default_source(&self, product_id: &ProductId) -> Option<LocationCode> {
        self.snapshot.product(product_id).and_then(default_source_location)
    }

    /// Validate and create a movement record.
    ///
    /// Validation happens before any repository call; the record joins the
    /// snapshot only after the store accepted it, so a transport failure
    /// never leaves a phantom local record. An initially-completed record
    /// (single-step flow) applies its stock delta immediately.
    pub async fn create_transfer(
        &mut self,
        request: TransferRequest,
        user_id: Option<UserId>,
    ) -> Result<MovementRecord, ServiceError> {
        request.validate()?;

        let product = self
            .snapshot
            .product(&request.product_id)
            .ok_or_else(|| DomainError::validation("unknown product"))?;

        for code in [&request.from_location, &request.to_location] {
            if self.snapshot.location(code).is_none() {
                return Err(DomainError::validation(format!("unknown location {code}")).into());
            }
        }

        let available = quantity_at(product, &request.from_location);
        if available < request.quantity as u64 {
            return Err(DomainError::validation(format!(
                "insufficient stock at {}: requested {}, available {available}",
                request.from_location, request.quantity,
            ))
            .into());
        }

        let record = request.to_record(MovementId::new(), user_id, Utc::now());
        let created = self.movements.create(record).await?;

        self.snapshot.push_movement(created.clone());
        if !created.status.is_open() {
            apply_delta(
                self.snapshot.products_mut(),
                &StockDelta {
                    product_id: created.product_id,
                    from_location: created.from_location.clone(),
                    to_location: created.to_location.clone(),
                    quantity: created.quantity,
                },
            );
            self.snapshot.bump_generation();
        }

        tracing::info!(
            movement = %created.id,
            product = %created.product_id,
            quantity = created.quantity,
            "transfer created"
        );
        Ok(created)
    }

    /// Complete every open member of a batch, exactly once each.
    ///
    /// A batch with no open members is a no-op, which makes re-invocation
    /// idempotent. Toward the caller this is all-or-nothing: the snapshot is
    /// untouched until every member patch has been accepted, and a transport
    /// failure surfaces verbatim.
    pub async fn complete_batch(&mut self, batch_key: &str) -> Result<usize, ServiceError> {
        let open: Vec<MovementRecord> = self
            .snapshot
            .movements()
            .iter()
            .filter(|m| m.batch_key() == batch_key && m.status.is_open())
            .cloned()
            .collect();

        if open.is_empty() {
            return Ok(0);
        }

        let deltas = completion_deltas(&open);

        for member in &open {
            self.movements
                .update(member.id, MovementPatch::status(MovementStatus::Completed))
                .await?;
        }

        for member in &open {
            if let Some(record) = self.snapshot.movement_mut(&member.id) {
                record.mark_completed();
            }
        }
        for delta in &deltas {
            apply_delta(self.snapshot.products_mut(), delta);
        }
        self.snapshot.bump_generation();

        tracing::info!(batch_key, completed = open.len(), "batch completed");
        Ok(open.len())
    }

    /// Reconstruct the editable item list of an open batch.
    pub fn edit_batch(&self, batch_key: &str) -> Result<Vec<BatchItem>, ServiceError> {
        let members: Vec<MovementRecord> = self
            .snapshot
            .movements()
            .iter()
            .filter(|m| m.batch_key() == batch_key)
            .cloned()
            .collect();
        Ok(edit_items(&members)?)
    }

    /// Delete one record in any state.
    ///
    /// A draft record never touched stock, so nothing needs undoing; a
    /// completed record's applied delta stays in place — deletion removes
    /// the record, not its effect.
    pub async fn delete_record(&mut self, id: MovementId) -> Result<MovementRecord, ServiceError> {
        if self.snapshot.movement(&id).is_none() {
            return Err(DomainError::not_found().into());
        }

        self.movements.delete(id).await?;

        match self.snapshot.remove_movement(&id) {
            Some(removed) => {
                tracing::info!(movement = %id, "movement deleted");
                Ok(removed)
            }
            None => Err(DomainError::not_found().into()),
        }
    }

    /// Amend a record's notes. Metadata only; stays open after completion.
    pub async fn amend_notes(
        &mut self,
        id: MovementId,
        notes: impl Into<String>,
    ) -> Result<MovementRecord, ServiceError> {
        if self.snapshot.movement(&id).is_none() {
            return Err(DomainError::not_found().into());
        }

        let updated = self.movements.update(id, MovementPatch::notes(notes)).await?;
        if let Some(record) = self.snapshot.movement_mut(&id) {
            record.notes = updated.notes.clone();
        }
        Ok(updated)
    }

    /// Movement list grouped for display, unfinished batches first.
    pub fn grouped_movements(&self) -> Vec<BatchGroup> {
        group_for_display(self.snapshot.movements())
    }
}

/// Unwrap an envelope, mapping a store-reported failure to a transport error.
fn accept<T>(envelope: Envelope<T>) -> Result<T, TransportError> {
    if envelope.success {
        Ok(envelope.data)
    } else {
        Err(TransportError::new("the store reported failure"))
    }
}
