//! Batch derivation: grouping, display ordering, editable items, deltas.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, LocationCode, ProductId};

use crate::movement::{MovementRecord, MovementStatus};

/// Aggregate status of a set of batch members.
///
/// Draft-dominance: the batch reads as draft while ANY member is still
/// draft/pending; only a fully completed batch reads as completed.
pub fn batch_status<'a, I>(members: I) -> MovementStatus
where
    I: IntoIterator<Item = &'a MovementRecord>,
{
    for member in members {
        if member.status.is_open() {
            return MovementStatus::Draft;
        }
    }
    MovementStatus::Completed
}

/// One row of the grouped movement list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchGroup {
    pub key: String,
    /// The most recent member stands in for the whole batch.
    pub representative: MovementRecord,
    pub grouped_count: usize,
    pub is_grouped: bool,
    pub status: MovementStatus,
}

/// Partition records into display groups by batch key.
///
/// Unfinished work surfaces first: open batches precede completed ones, and
/// each band orders by descending representative timestamp. Ties fall back
/// to the batch key so the ordering is fully deterministic.
pub fn group_for_display(records: &[MovementRecord]) -> Vec<BatchGroup> {
    let mut by_key: BTreeMap<String, Vec<&MovementRecord>> = BTreeMap::new();
    for record in records {
        by_key.entry(record.batch_key()).or_default().push(record);
    }

    let mut groups: Vec<BatchGroup> = by_key
        .into_iter()
        .filter_map(|(key, members)| {
            let representative = members
                .iter()
                .max_by(|a, b| a.occurred_at.cmp(&b.occurred_at).then(a.id.cmp(&b.id)))
                .copied()
                .cloned()?;
            let status = batch_status(members.iter().copied());
            let grouped_count = members.len();
            Some(BatchGroup {
                key,
                representative,
                grouped_count,
                is_grouped: grouped_count > 1,
                status,
            })
        })
        .collect();

    groups.sort_by(|a, b| {
        let band = |g: &BatchGroup| u8::from(!g.status.is_open());
        band(a)
            .cmp(&band(b))
            .then(b.representative.occurred_at.cmp(&a.representative.occurred_at))
            .then(a.key.cmp(&b.key))
    });

    groups
}

/// Editable line of a draft batch: one product/route with merged quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub product_id: ProductId,
    pub from_location: LocationCode,
    pub to_location: LocationCode,
    pub quantity: i64,
    pub notes: String,
}

/// Reconstruct the editable item list of a batch.
///
/// Members sharing a `(product, from, to)` triple merge into one item with
/// summed quantity and distinct notes joined by "; ". Only open batches are
/// editable; a completed batch's structural fields are immutable.
pub fn edit_items(members: &[MovementRecord]) -> DomainResult<Vec<BatchItem>> {
    if members.is_empty() {
        return Err(DomainError::not_found());
    }
    if batch_status(members.iter()) == MovementStatus::Completed {
        return Err(DomainError::invariant(
            "completed batch is immutable; only notes may be amended",
        ));
    }

    let mut merged: BTreeMap<(ProductId, LocationCode, LocationCode), (i64, Vec<String>)> =
        BTreeMap::new();
    for member in members {
        let key = (
            member.product_id,
            member.from_location.clone(),
            member.to_location.clone(),
        );
        let entry = merged.entry(key).or_default();
        entry.0 += member.quantity;
        let note = member.notes.trim();
        if !note.is_empty() && !entry.1.iter().any(|n| n == note) {
            entry.1.push(note.to_string());
        }
    }

    Ok(merged
        .into_iter()
        .map(|((product_id, from_location, to_location), (quantity, notes))| BatchItem {
            product_id,
            from_location,
            to_location,
            quantity,
            notes: notes.join("; "),
        })
        .collect())
}

/// Stock delta of one member, pending application on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDelta {
    pub product_id: ProductId,
    pub from_location: LocationCode,
    pub to_location: LocationCode,
    pub quantity: i64,
}

/// Deltas of the members a completion still has to apply.
///
/// Already-completed members contribute nothing, which is what makes batch
/// completion idempotent.
pub fn completion_deltas(members: &[MovementRecord]) -> Vec<StockDelta> {
    members
        .iter()
        .filter(|m| m.status.is_open())
        .map(|m| StockDelta {
            product_id: m.product_id,
            from_location: m.from_location.clone(),
            to_location: m.to_location.clone(),
            quantity: m.quantity,
        })
        .collect()
}
