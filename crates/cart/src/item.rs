//! A single cart line.

use std::fmt::Debug;
use std::hash::Hash;

use common::{ItemOptions, ItemUuid, Money};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use session_store::{SessionRecord, SessionStoreError};

/// Bound for caller-chosen item identifiers (SKUs, numeric product ids, ...).
///
/// Item ids are compared for grouping and serialized into the session store.
pub trait ItemKey: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned {}

impl<T> ItemKey for T where T: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned {}

/// One unit in a cart.
///
/// Adding three units of a product creates three `Item`s sharing the same
/// `item_id`, each with its own `uuid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item<K> {
    uuid: ItemUuid,
    item_id: K,
    price: Option<Money>,
    #[serde(default)]
    options: ItemOptions,
}

impl<K: ItemKey> Item<K> {
    pub fn new(uuid: ItemUuid, item_id: K, price: Option<Money>, options: ItemOptions) -> Self {
        Self {
            uuid,
            item_id,
            price,
            options,
        }
    }

    /// Rebuilds an item from its stored form.
    pub fn from_record(uuid: ItemUuid, record: &SessionRecord) -> Result<Self, SessionStoreError> {
        Ok(Self {
            uuid,
            item_id: record.item_id_as()?,
            price: record.price,
            options: record.options.clone(),
        })
    }

    /// Returns the stored form of this item.
    pub fn to_record(&self) -> Result<SessionRecord, SessionStoreError> {
        SessionRecord::new(&self.item_id, self.price, self.options.clone())
    }

    pub fn uuid(&self) -> ItemUuid {
        self.uuid
    }

    pub fn id(&self) -> &K {
        &self.item_id
    }

    pub fn price(&self) -> Option<Money> {
        self.price
    }

    /// Returns the price, counting a missing price as zero.
    pub fn price_or_zero(&self) -> Money {
        self.price.unwrap_or_default()
    }

    pub fn options(&self) -> &ItemOptions {
        &self.options
    }

    /// Replaces the price.
    pub fn update_price(&mut self, price: Option<Money>) -> &mut Self {
        self.price = price;
        self
    }

    /// Merges `options` into the current options. Existing keys are overwritten.
    pub fn update_options(&mut self, options: ItemOptions) -> &mut Self {
        self.options.extend(options);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: serde_json::Value) -> ItemOptions {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("options must be an object"),
        }
    }

    #[test]
    fn update_options_merges() {
        let mut item = Item::new(
            ItemUuid::new(),
            "sku-1".to_string(),
            None,
            options(json!({"size": "M", "color": "red"})),
        );

        item.update_options(options(json!({"color": "blue", "gift": true})));

        assert_eq!(
            item.options(),
            &options(json!({"size": "M", "color": "blue", "gift": true}))
        );
    }

    #[test]
    fn update_price_replaces() {
        let mut item = Item::new(ItemUuid::new(), 7u32, Some(Money::from_cents(100)), ItemOptions::new());
        item.update_price(Some(Money::from_cents(250)));
        assert_eq!(item.price(), Some(Money::from_cents(250)));

        item.update_price(None);
        assert_eq!(item.price(), None);
        assert!(item.price_or_zero().is_zero());
    }

    #[test]
    fn record_round_trip_preserves_fields() {
        let item = Item::new(
            ItemUuid::new(),
            "sku-1".to_string(),
            Some(Money::from_cents(999)),
            options(json!({"engraving": "hello"})),
        );

        let record = item.to_record().unwrap();
        assert_eq!(record.item_id, json!("sku-1"));

        let restored = Item::<String>::from_record(item.uuid(), &record).unwrap();
        assert_eq!(restored, item);
    }
}
