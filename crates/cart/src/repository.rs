//! In-memory index of cart lines.

use common::ItemUuid;
use indexmap::IndexMap;

use crate::collection::ItemCollection;
use crate::item::{Item, ItemKey};

/// Holds every line of a cart twice: once in the `all` collection and once
/// in the group for its item id.
///
/// A uuid is in `all` if and only if it is in exactly one group, the one
/// matching its item id. Groups never stay empty.
#[derive(Debug, Clone)]
pub struct ItemRepository<K: ItemKey> {
    all: ItemCollection<K>,
    by_id: IndexMap<K, ItemCollection<K>>,
}

impl<K: ItemKey> Default for ItemRepository<K> {
    fn default() -> Self {
        Self {
            all: ItemCollection::new(),
            by_id: IndexMap::new(),
        }
    }
}

impl<K: ItemKey> ItemRepository<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item to `all` and to its group, creating the group on first use.
    ///
    /// An item reusing an existing uuid replaces the previous line, even when
    /// the item id differs.
    pub fn add(&mut self, item: Item<K>) {
        if self.all.contains(&item.uuid()) {
            self.remove(&item.uuid());
        }

        self.by_id
            .entry(item.id().clone())
            .or_default()
            .add(item.clone());
        self.all.add(item);
    }

    /// Returns the collection of all lines.
    pub fn all(&self) -> &ItemCollection<K> {
        &self.all
    }

    /// Returns every group, keyed by item id, in order of first appearance.
    pub fn by_id_groups(&self) -> &IndexMap<K, ItemCollection<K>> {
        &self.by_id
    }

    pub fn by_id(&self, item_id: &K) -> Option<&ItemCollection<K>> {
        self.by_id.get(item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Removes a line from `all` and from its group.
    pub fn remove(&mut self, uuid: &ItemUuid) -> Option<Item<K>> {
        let item = self.all.remove(uuid)?;
        self.remove_from_group(item.id(), uuid);
        Some(item)
    }

    /// Removes the first line carrying `item_id` and returns its uuid.
    pub fn remove_by_item_id(&mut self, item_id: &K) -> Option<ItemUuid> {
        let uuid = self.all.has_item_id(item_id)?;
        self.all.remove(&uuid);
        self.remove_from_group(item_id, &uuid);
        Some(uuid)
    }

    /// Drops a whole group and returns the uuids it held.
    pub fn destroy_group(&mut self, item_id: &K) -> Vec<ItemUuid> {
        let Some(group) = self.by_id.shift_remove(item_id) else {
            return Vec::new();
        };

        let uuids = group.uuids();
        for uuid in &uuids {
            self.all.remove(uuid);
        }
        uuids
    }

    /// Applies `f` to a line in both indexes and returns the updated line.
    pub fn update<F>(&mut self, uuid: &ItemUuid, mut f: F) -> Option<&Item<K>>
    where
        F: FnMut(&mut Item<K>),
    {
        let item = self.all.find_mut(uuid)?;
        f(item);

        if let Some(grouped) = self
            .by_id
            .get_mut(item.id())
            .and_then(|group| group.find_mut(uuid))
        {
            f(grouped);
        }

        self.all.find(uuid)
    }

    fn remove_from_group(&mut self, item_id: &K, uuid: &ItemUuid) {
        let Some(group) = self.by_id.get_mut(item_id) else {
            return;
        };

        group.remove(uuid);
        if group.is_empty() {
            self.by_id.shift_remove(item_id);
        }
    }
}

impl<K: ItemKey> FromIterator<Item<K>> for ItemRepository<K> {
    fn from_iter<I: IntoIterator<Item = Item<K>>>(iter: I) -> Self {
        let mut repository = Self::new();
        for item in iter {
            repository.add(item);
        }
        repository
    }
}
