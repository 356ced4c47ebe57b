use stockroom_catalog::{Product, WarehouseLocation};
use stockroom_core::LocationCode;

/// Quantity of one product held at a location.
///
/// When the product carries a per-location mapping, the mapping is
/// authoritative (absent codes hold 0). Without a mapping, the primary
/// location is treated as holding all of `stock`.
pub fn quantity_at(product: &Product, code: &LocationCode) -> u64 {
    match &product.location_stock {
        Some(stock) => stock.get(code),
        None if product.location == *code => product.stock.max(0) as u64,
        None => 0,
    }
}

/// Total quantity held at a location across all products.
pub fn occupancy(code: &LocationCode, products: &[Product]) -> u64 {
    products.iter().map(|p| quantity_at(p, code)).sum()
}

/// Occupancy as a percentage of capacity.
///
/// A location with zero capacity reports 0.0 rather than dividing by zero.
pub fn utilization(location: &WarehouseLocation, products: &[Product]) -> f64 {
    if location.capacity == 0 {
        return 0.0;
    }
    occupancy(&location.code, products) as f64 / location.capacity as f64 * 100.0
}

/// Location to pre-fill as the "from" side of a new transfer.
///
/// Picks the location holding the greatest quantity; ties resolve to the
/// lexicographically smallest code (the mapping iterates in code order and
/// only a strictly greater quantity displaces the current best). Falls back
/// to the primary location, or `None` when nothing is resolvable.
pub fn default_source_location(product: &Product) -> Option<LocationCode> {
    if let Some(stock) = &product.location_stock {
        let mut best: Option<(&LocationCode, u64)> = None;
        for (code, qty) in stock.iter() {
            match best {
                Some((_, best_qty)) if qty <= best_qty => {}
                _ => best = Some((code, qty)),
            }
        }
        if let Some((code, qty)) = best {
            if qty > 0 {
                return Some(code.clone());
            }
        }
    }

    if product.location.is_empty() {
        None
    } else {
        Some(product.location.clone())
    }
}
