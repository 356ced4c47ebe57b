use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{ClientId, Entity};

/// Contact information for a client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Client read model for the clients search category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub city: String,
    /// Lifetime purchase total in smallest currency unit.
    #[serde(default)]
    pub total_purchases: i64,
    pub created_at: DateTime<Utc>,
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
