//! Per-category filter configurations.
//!
//! One strongly-typed struct per search category instead of a loose field
//! bag; `FilterConfig` is the tagged union the preset store freezes. A record
//! matches a configuration when every active field matches.

use serde::{Deserialize, Serialize};

use stockroom_catalog::{Product, StockStatus};
use stockroom_finance::{EntryKind, FinancialEntry, PaymentMethod};
use stockroom_movements::{MovementRecord, MovementStatus};
use stockroom_parties::Client;

use crate::category::SearchCategory;
use crate::fields::{ref_matches, set_matches, text_active, text_matches, DateRange, RangeFilter};

/// Product search fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub name: String,
    /// Category id or free text matched against the category name.
    pub category: String,
    /// Supplier id or free text matched against the supplier name.
    pub supplier: String,
    pub location: String,
    pub price: RangeFilter<i64>,
    pub stock: RangeFilter<i64>,
    pub stock_status: Vec<StockStatus>,
    pub created: DateRange,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        text_matches(&self.name, &product.name)
            && ref_matches(&self.category, product.category.as_ref())
            && ref_matches(&self.supplier, product.supplier.as_ref())
            && text_matches(&self.location, product.location.as_str())
            && self.price.matches(product.sale_price)
            && self.stock.matches(product.stock)
            && set_matches(&self.stock_status, &product.stock_status())
            && self.created.matches(product.created_at)
    }

    pub fn active_field_count(&self) -> usize {
        usize::from(text_active(&self.name))
            + usize::from(text_active(&self.category))
            + usize::from(text_active(&self.supplier))
            + usize::from(text_active(&self.location))
            + usize::from(self.price.is_active())
            + usize::from(self.stock.is_active())
            + usize::from(!self.stock_status.is_empty())
            + usize::from(self.created.is_active())
    }
}

/// Movement history search fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementFilter {
    /// Matched against the movement's product identifier.
    pub product: String,
    pub from_location: String,
    pub to_location: String,
    pub status: Vec<MovementStatus>,
    /// Matched against the submitting user's identifier.
    pub user: String,
    pub quantity: RangeFilter<i64>,
    pub notes: String,
    pub date: DateRange,
}

impl MovementFilter {
    pub fn matches(&self, movement: &MovementRecord) -> bool {
        text_matches(&self.product, &movement.product_id.to_string())
            && text_matches(&self.from_location, movement.from_location.as_str())
            && text_matches(&self.to_location, movement.to_location.as_str())
            && set_matches(&self.status, &movement.status)
            && text_matches(
                &self.user,
                &movement.user_id.map(|u| u.to_string()).unwrap_or_default(),
            )
            && self.quantity.matches(movement.quantity)
            && text_matches(&self.notes, &movement.notes)
            && self.date.matches(movement.occurred_at)
    }

    pub fn active_field_count(&self) -> usize {
        usize::from(text_active(&self.product))
            + usize::from(text_active(&self.from_location))
            + usize::from(text_active(&self.to_location))
            + usize::from(!self.status.is_empty())
            + usize::from(text_active(&self.user))
            + usize::from(self.quantity.is_active())
            + usize::from(text_active(&self.notes))
            + usize::from(self.date.is_active())
    }
}

/// Client search fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientFilter {
    pub name: String,
    pub city: String,
    pub phone: String,
    pub purchases: RangeFilter<i64>,
    pub created: DateRange,
}

impl ClientFilter {
    pub fn matches(&self, client: &Client) -> bool {
        text_matches(&self.name, &client.name)
            && text_matches(&self.city, &client.city)
            && text_matches(&self.phone, client.contact.phone.as_deref().unwrap_or(""))
            && self.purchases.matches(client.total_purchases)
            && self.created.matches(client.created_at)
    }

    pub fn active_field_count(&self) -> usize {
        usize::from(text_active(&self.name))
            + usize::from(text_active(&self.city))
            + usize::from(text_active(&self.phone))
            + usize::from(self.purchases.is_active())
            + usize::from(self.created.is_active())
    }
}

/// Financial entry search fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialFilter {
    pub counterparty: String,
    pub kind: Vec<EntryKind>,
    pub payment_method: Vec<PaymentMethod>,
    pub amount: RangeFilter<i64>,
    pub notes: String,
    pub date: DateRange,
}

impl FinancialFilter {
    pub fn matches(&self, entry: &FinancialEntry) -> bool {
        text_matches(&self.counterparty, &entry.counterparty)
            && set_matches(&self.kind, &entry.kind)
            && set_matches(&self.payment_method, &entry.payment_method)
            && self.amount.matches(entry.amount)
            && text_matches(&self.notes, &entry.notes)
            && self.date.matches(entry.occurred_at)
    }

    pub fn active_field_count(&self) -> usize {
        usize::from(text_active(&self.counterparty))
            + usize::from(!self.kind.is_empty())
            + usize::from(!self.payment_method.is_empty())
            + usize::from(self.amount.is_active())
            + usize::from(text_active(&self.notes))
            + usize::from(self.date.is_active())
    }
}

/// A filter configuration tagged by its search category.
///
/// This is the shape presets and recent searches freeze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum FilterConfig {
    Products(ProductFilter),
    Movements(MovementFilter),
    Clients(ClientFilter),
    Financial(FinancialFilter),
}

impl FilterConfig {
    pub fn category(&self) -> SearchCategory {
        match self {
            FilterConfig::Products(_) => SearchCategory::Products,
            FilterConfig::Movements(_) => SearchCategory::Movements,
            FilterConfig::Clients(_) => SearchCategory::Clients,
            FilterConfig::Financial(_) => SearchCategory::Financial,
        }
    }

    /// Number of fields that actually constrain matching.
    pub fn active_field_count(&self) -> usize {
        match self {
            FilterConfig::Products(f) => f.active_field_count(),
            FilterConfig::Movements(f) => f.active_field_count(),
            FilterConfig::Clients(f) => f.active_field_count(),
            FilterConfig::Financial(f) => f.active_field_count(),
        }
    }
}

/// The live filter state: one configuration per category plus the category
/// currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub products: ProductFilter,
    pub movements: MovementFilter,
    pub clients: ClientFilter,
    pub financial: FinancialFilter,
    pub active: SearchCategory,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            products: ProductFilter::default(),
            movements: MovementFilter::default(),
            clients: ClientFilter::default(),
            financial: FinancialFilter::default(),
            active: SearchCategory::Products,
        }
    }
}

impl FilterSet {
    /// Snapshot of one category's configuration.
    pub fn config_of(&self, category: SearchCategory) -> FilterConfig {
        match category {
            SearchCategory::Products => FilterConfig::Products(self.products.clone()),
            SearchCategory::Movements => FilterConfig::Movements(self.movements.clone()),
            SearchCategory::Clients => FilterConfig::Clients(self.clients.clone()),
            SearchCategory::Financial => FilterConfig::Financial(self.financial.clone()),
        }
    }

    /// Snapshot of the active category's configuration.
    pub fn active_config(&self) -> FilterConfig {
        self.config_of(self.active)
    }

    /// Replace one category's configuration and switch to that category.
    ///
    /// This is what applying a loaded preset does.
    pub fn apply(&mut self, config: FilterConfig) {
        self.active = config.category();
        match config {
            FilterConfig::Products(f) => self.products = f,
            FilterConfig::Movements(f) => self.movements = f,
            FilterConfig::Clients(f) => self.clients = f,
            FilterConfig::Financial(f) => self.financial = f,
        }
    }

    /// Reset one category back to match-everything defaults.
    pub fn reset(&mut self, category: SearchCategory) {
        match category {
            SearchCategory::Products => self.products = ProductFilter::default(),
            SearchCategory::Movements => self.movements = MovementFilter::default(),
            SearchCategory::Clients => self.clients = ClientFilter::default(),
            SearchCategory::Financial => self.financial = FinancialFilter::default(),
        }
    }
}
