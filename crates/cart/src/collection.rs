//! Ordered collection of cart lines.

use common::{ItemUuid, Money};
use indexmap::IndexMap;

use crate::item::{Item, ItemKey};

/// Cart lines keyed by uuid, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCollection<K> {
    items: IndexMap<ItemUuid, Item<K>>,
}

impl<K> Default for ItemCollection<K> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }
}

impl<K: ItemKey> ItemCollection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an item, replacing any item with the same uuid.
    ///
    /// A replaced item keeps its position. Returns the replaced item.
    pub fn add(&mut self, item: Item<K>) -> Option<Item<K>> {
        self.items.insert(item.uuid(), item)
    }

    pub fn find(&self, uuid: &ItemUuid) -> Option<&Item<K>> {
        self.items.get(uuid)
    }

    pub(crate) fn find_mut(&mut self, uuid: &ItemUuid) -> Option<&mut Item<K>> {
        self.items.get_mut(uuid)
    }

    pub fn contains(&self, uuid: &ItemUuid) -> bool {
        self.items.contains_key(uuid)
    }

    /// Removes an item. Missing uuids are ignored.
    pub fn remove(&mut self, uuid: &ItemUuid) -> Option<Item<K>> {
        self.items.shift_remove(uuid)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the uuid of the first item with the given item id.
    pub fn has_item_id(&self, item_id: &K) -> Option<ItemUuid> {
        self.items
            .values()
            .find(|item| item.id() == item_id)
            .map(Item::uuid)
    }

    pub fn uuids(&self) -> Vec<ItemUuid> {
        self.items.keys().copied().collect()
    }

    /// Sums all prices. Items without a price count as zero.
    pub fn total(&self) -> Money {
        self.items.values().map(Item::price_or_zero).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item<K>> {
        self.items.values()
    }
}

impl<'a, K> IntoIterator for &'a ItemCollection<K> {
    type Item = &'a Item<K>;
    type IntoIter = indexmap::map::Values<'a, ItemUuid, Item<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}
