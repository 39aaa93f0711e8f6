use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form option metadata attached to a cart line (size, colour, ...).
pub type ItemOptions = serde_json::Map<String, serde_json::Value>;

/// Internal identifier of a single cart line.
///
/// Every unit added to a cart gets its own `ItemUuid`, even when several
/// lines share the same caller-supplied item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemUuid(Uuid);

impl ItemUuid {
    /// Creates a new random line identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a line identifier from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ItemUuid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ItemUuid> for Uuid {
    fn from(id: ItemUuid) -> Self {
        id.0
    }
}
