use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{PresetId, SearchId};

use crate::category::SearchCategory;
use crate::config::FilterConfig;

/// A named, frozen filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub id: PresetId,
    pub name: String,
    pub category: SearchCategory,
    pub config: FilterConfig,
    pub created_at: DateTime<Utc>,
}

/// One entry of the bounded recent-search history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub id: SearchId,
    pub category: SearchCategory,
    pub query: String,
    pub config: FilterConfig,
    pub occurred_at: DateTime<Utc>,
}
