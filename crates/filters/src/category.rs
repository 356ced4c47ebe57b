use serde::{Deserialize, Serialize};

/// Search category a filter configuration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    Products,
    Movements,
    Clients,
    Financial,
}

impl SearchCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::Products => "products",
            SearchCategory::Movements => "movements",
            SearchCategory::Clients => "clients",
            SearchCategory::Financial => "financial",
        }
    }
}

impl core::fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
