use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, LocationCode};

/// Warehouse location master data, keyed by its unique code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseLocation {
    pub code: LocationCode,
    pub name: String,
    pub capacity: u64,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub section: String,
}

impl WarehouseLocation {
    pub fn new(code: impl Into<LocationCode>, name: impl Into<String>, capacity: u64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            capacity,
            zone: String::new(),
            level: 0,
            section: String::new(),
        }
    }
}

impl Entity for WarehouseLocation {
    type Id = LocationCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}
