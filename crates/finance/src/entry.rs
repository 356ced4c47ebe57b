use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, EntryId};

/// Direction of a financial entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

/// How an entry was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

/// Financial entry read model for the financial search category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: EntryId,
    pub kind: EntryKind,
    /// Amount in smallest currency unit (e.g. cents), always positive;
    /// `kind` carries the direction.
    pub amount: i64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub counterparty: String,
    #[serde(default)]
    pub notes: String,
    pub occurred_at: DateTime<Utc>,
}

impl Entity for FinancialEntry {
    type Id = EntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
