use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{ItemOptions, Money, Result};

/// The durable form of one cart line.
///
/// The item id is kept as raw JSON so the store stays independent of the
/// key type chosen by the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Caller-supplied item identifier.
    pub item_id: serde_json::Value,

    /// Unit price, if one was given.
    #[serde(default)]
    pub price: Option<Money>,

    /// Option metadata.
    #[serde(default)]
    pub options: ItemOptions,
}

impl SessionRecord {
    /// Builds a record from a typed item id.
    pub fn new<K: Serialize>(
        item_id: &K,
        price: Option<Money>,
        options: ItemOptions,
    ) -> Result<Self> {
        Ok(Self {
            item_id: serde_json::to_value(item_id)?,
            price,
            options,
        })
    }

    /// Decodes the stored item id into the caller's key type.
    pub fn item_id_as<K: DeserializeOwned>(&self) -> Result<K> {
        Ok(serde_json::from_value(self.item_id.clone())?)
    }
}
