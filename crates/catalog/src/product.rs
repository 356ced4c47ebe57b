use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, LocationCode, ProductId};

use crate::location_stock::LocationStock;
use crate::named_ref::NamedRef;

/// Stock level classification derived from `stock` and `min_stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

/// Product read model mirrored from the external store.
///
/// When `location_stock` is present its total matches `stock` after every
/// completed transfer; when absent, the primary `location` is treated as
/// holding all of `stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub stock: i64,
    #[serde(default)]
    pub min_stock: i64,
    #[serde(default)]
    pub reserved_stock: i64,
    #[serde(default)]
    pub available_stock: i64,
    pub location: LocationCode,
    #[serde(default)]
    pub location_stock: Option<LocationStock>,
    #[serde(default)]
    pub category: Option<NamedRef>,
    #[serde(default)]
    pub supplier: Option<NamedRef>,
    /// Prices in smallest currency unit (e.g. cents).
    #[serde(default)]
    pub purchase_price: i64,
    #[serde(default)]
    pub sale_price: i64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        if self.stock <= 0 {
            StockStatus::OutOfStock
        } else if self.stock <= self.min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
