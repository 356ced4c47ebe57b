//! Stock application for completed transfers.

use stockroom_catalog::{LocationStock, Product};
use stockroom_core::LocationCode;

use crate::batch::StockDelta;

/// Apply one transfer to a product's per-location stock.
///
/// Materializes the mapping from the primary location when the product has
/// none, then moves `min(quantity, available at source)` — the clip keeps
/// every quantity non-negative and the mapping total equal to `stock` even
/// against a snapshot that changed underneath the caller. Total stock is
/// untouched; a transfer only redistributes it. Returns the amount moved.
pub fn apply_transfer(
    product: &mut Product,
    from: &LocationCode,
    to: &LocationCode,
    quantity: i64,
) -> u64 {
    if quantity <= 0 || from == to {
        return 0;
    }

    let mut stock = match product.location_stock.take() {
        Some(stock) => stock,
        None => {
            let mut stock = LocationStock::new();
            if !product.location.is_empty() {
                stock.set(product.location.clone(), product.stock.max(0) as u64);
            }
            stock
        }
    };

    let moved = stock.remove_up_to(from, quantity as u64);
    if moved > 0 {
        stock.add(to.clone(), moved);
    }
    product.location_stock = Some(stock);
    moved
}

/// Apply one completion delta against the product snapshot.
///
/// A delta whose product is no longer in the snapshot applies nothing.
pub fn apply_delta(products: &mut [Product], delta: &StockDelta) -> u64 {
    match products.iter_mut().find(|p| p.id == delta.product_id) {
        Some(product) => apply_transfer(
            product,
            &delta.from_location,
            &delta.to_location,
            delta.quantity,
        ),
        None => {
            tracing::warn!(product_id = %delta.product_id, "completion delta for unknown product ignored");
            0
        }
    }
}
