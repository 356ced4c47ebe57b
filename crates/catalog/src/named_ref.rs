//! Identifier + display-name references.

use serde::{Deserialize, Serialize};

use stockroom_core::ValueObject;

/// Reference to a record in another collection (category, supplier).
///
/// The external store sometimes hands back only the identifier and sometimes
/// the identifier plus a display name; filters match against either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl NamedRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Reference known only by id (no display name delivered).
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }
}

impl ValueObject for NamedRef {}
