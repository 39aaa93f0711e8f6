//! A single cart instance bound to the session store.

use common::{ItemOptions, ItemUuid, Money};
use indexmap::IndexMap;
use session_store::{CartKey, SessionStore};

use crate::collection::ItemCollection;
use crate::error::CartError;
use crate::item::{Item, ItemKey};
use crate::repository::ItemRepository;

/// Manages one cart instance.
///
/// The repository is a cache of the session store: it is rebuilt from the
/// store when the cart is opened and every mutation is mirrored back.
/// Read operations never touch the store.
pub struct CartManager<K: ItemKey, S: SessionStore> {
    key: CartKey,
    store: S,
    repository: ItemRepository<K>,
}

impl<K: ItemKey, S: SessionStore> CartManager<K, S> {
    /// Opens the cart stored under `key`.
    ///
    /// Fails with [`CartError::SessionUnavailable`] when the store has no
    /// active session.
    pub fn open(store: S, key: CartKey) -> Result<Self, CartError> {
        if !store.is_active() {
            tracing::warn!(%key, "refusing to open cart without an active session");
            return Err(CartError::SessionUnavailable);
        }

        let mut repository = ItemRepository::new();
        for (uuid, record) in store.entries(&key)? {
            repository.add(Item::from_record(uuid, &record)?);
        }

        metrics::counter!("cart_instances_opened_total").increment(1);
        tracing::info!(
            %key,
            items = repository.all().count(),
            total = %repository.all().total(),
            "cart opened"
        );

        Ok(Self {
            key,
            store,
            repository,
        })
    }

    /// Returns the store key of this cart.
    pub fn key(&self) -> &CartKey {
        &self.key
    }

    /// Returns the instance name.
    pub fn name(&self) -> &str {
        self.key.instance()
    }

    /// Returns a reference to the underlying session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn find(&self, uuid: &ItemUuid) -> Option<&Item<K>> {
        self.repository.all().find(uuid)
    }

    /// Adds `quantity` lines of `item_id`, each with its own uuid.
    #[tracing::instrument(skip(self, options), fields(cart = %self.key))]
    pub fn add(
        &mut self,
        item_id: K,
        quantity: u32,
        price: Option<Money>,
        options: ItemOptions,
    ) -> Result<&mut Self, CartError> {
        for _ in 0..quantity {
            let item = Item::new(ItemUuid::new(), item_id.clone(), price, options.clone());
            let record = item.to_record()?;
            let uuid = item.uuid();

            self.store.set_entry(&self.key, uuid, record)?;
            self.repository.add(item);
            metrics::counter!("cart_items_added_total").increment(1);
            tracing::debug!(%uuid, "line added");
        }
        Ok(self)
    }

    /// Adds a single line without price or options.
    pub fn add_one(&mut self, item_id: K) -> Result<&mut Self, CartError> {
        self.add(item_id, 1, None, ItemOptions::new())
    }

    /// Removes a line. Unknown uuids are ignored.
    #[tracing::instrument(skip(self), fields(cart = %self.key))]
    pub fn remove(&mut self, uuid: &ItemUuid) -> Result<&mut Self, CartError> {
        if self.find(uuid).is_none() {
            return Ok(self);
        }
        self.store.delete_entry(&self.key, *uuid)?;
        self.repository.remove(uuid);
        metrics::counter!("cart_items_removed_total").increment(1);
        tracing::debug!(%uuid, "line removed");
        Ok(self)
    }

    /// Removes up to `quantity` lines of `item_id`, oldest first.
    #[tracing::instrument(skip(self), fields(cart = %self.key))]
    pub fn remove_by_item_id(&mut self, item_id: &K, quantity: u32) -> Result<&mut Self, CartError> {
        for _ in 0..quantity {
            let Some(uuid) = self.repository.all().has_item_id(item_id) else {
                break;
            };
            self.store.delete_entry(&self.key, uuid)?;
            self.repository.remove_by_item_id(item_id);
            metrics::counter!("cart_items_removed_total").increment(1);
            tracing::debug!(%uuid, "line removed");
        }
        Ok(self)
    }

    /// Empties the cart and deletes its stored entries.
    #[tracing::instrument(skip(self), fields(cart = %self.key))]
    pub fn destroy(&mut self) -> Result<(), CartError> {
        let removed = self.store.delete_all(&self.key)?;
        self.repository = ItemRepository::new();
        metrics::counter!("cart_items_removed_total").increment(removed as u64);
        tracing::debug!(removed, "cart destroyed");
        Ok(())
    }

    /// Removes every line of `item_id`.
    #[tracing::instrument(skip(self), fields(cart = %self.key))]
    pub fn destroy_by_item_id(&mut self, item_id: &K) -> Result<(), CartError> {
        let uuids = self
            .content_by_id(item_id)
            .map(ItemCollection::uuids)
            .unwrap_or_default();
        for uuid in &uuids {
            self.store.delete_entry(&self.key, *uuid)?;
            self.repository.remove(uuid);
            metrics::counter!("cart_items_removed_total").increment(1);
        }
        tracing::debug!(removed = uuids.len(), "group destroyed");
        Ok(())
    }

    /// Replaces the price of a line. Unknown uuids are ignored.
    #[tracing::instrument(skip(self), fields(cart = %self.key))]
    pub fn update_price(
        &mut self,
        uuid: &ItemUuid,
        price: Option<Money>,
    ) -> Result<&mut Self, CartError> {
        self.update(uuid, |item| {
            item.update_price(price);
        })
    }

    /// Merges options into a line. Unknown uuids are ignored.
    #[tracing::instrument(skip(self, options), fields(cart = %self.key))]
    pub fn update_options(
        &mut self,
        uuid: &ItemUuid,
        options: ItemOptions,
    ) -> Result<&mut Self, CartError> {
        self.update(uuid, |item| {
            item.update_options(options.clone());
        })
    }

    pub fn content(&self) -> &ItemCollection<K> {
        self.repository.all()
    }

    pub fn content_by_id_group(&self) -> &IndexMap<K, ItemCollection<K>> {
        self.repository.by_id_groups()
    }

    pub fn content_by_id(&self, item_id: &K) -> Option<&ItemCollection<K>> {
        self.repository.by_id(item_id)
    }

    /// Number of lines in the cart.
    pub fn count(&self) -> usize {
        self.repository.all().count()
    }

    /// Number of distinct item ids in the cart.
    pub fn count_by_item_id(&self) -> usize {
        self.repository.by_id_groups().len()
    }

    /// Number of lines carrying `item_id`.
    pub fn count_of(&self, item_id: &K) -> usize {
        self.repository.by_id(item_id).map_or(0, ItemCollection::count)
    }

    pub fn total(&self) -> Money {
        self.repository.all().total()
    }

    fn update<F>(&mut self, uuid: &ItemUuid, mut f: F) -> Result<&mut Self, CartError>
    where
        F: FnMut(&mut Item<K>),
    {
        let Some(mut item) = self.find(uuid).cloned() else {
            return Ok(self);
        };
        f(&mut item);
        self.store.set_entry(&self.key, *uuid, item.to_record()?)?;
        self.repository.update(uuid, f);
        Ok(self)
    }
}

impl<K: ItemKey, S: SessionStore> std::fmt::Debug for CartManager<K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("key", &self.key)
            .field("items", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use session_store::{InMemorySessionStore, SessionStoreExt};

    fn open(store: &InMemorySessionStore) -> CartManager<String, InMemorySessionStore> {
        CartManager::open(store.clone(), CartKey::for_instance("default")).unwrap()
    }

    fn sku(id: &str) -> String {
        id.to_string()
    }

    #[test]
    fn open_requires_active_session() {
        let store = InMemorySessionStore::inactive();
        let result = CartManager::<String, _>::open(store, CartKey::for_instance("default"));
        assert!(matches!(result, Err(CartError::SessionUnavailable)));
    }

    #[test]
    fn add_mirrors_each_line_into_store() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);

        cart.add(sku("sku-1"), 3, Some(Money::from_cents(250)), ItemOptions::new())
            .unwrap();

        assert_eq!(cart.count(), 3);
        assert_eq!(store.entry_count(cart.key()).unwrap(), 3);
        for line in cart.content() {
            let record = store.get_entry(cart.key(), line.uuid()).unwrap().unwrap();
            assert_eq!(record.item_id, json!("sku-1"));
            assert_eq!(record.price, Some(Money::from_cents(250)));
        }
    }

    #[test]
    fn add_with_zero_quantity_does_nothing() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);

        cart.add(sku("sku-1"), 0, None, ItemOptions::new()).unwrap();
        assert_eq!(cart.count(), 0);
        assert!(!store.has_entries(cart.key()).unwrap());
    }

    #[test]
    fn add_is_chainable() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);

        cart.add_one(sku("a"))
            .unwrap()
            .add_one(sku("b"))
            .unwrap()
            .add_one(sku("a"))
            .unwrap();

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.count_by_item_id(), 2);
        assert_eq!(cart.count_of(&sku("a")), 2);
        assert_eq!(cart.count_of(&sku("zzz")), 0);
    }

    #[test]
    fn remove_unknown_uuid_is_noop() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);
        cart.add_one(sku("a")).unwrap();

        cart.remove(&ItemUuid::new()).unwrap();
        assert_eq!(cart.count(), 1);
        assert_eq!(store.entry_count(cart.key()).unwrap(), 1);
    }

    #[test]
    fn remove_deletes_from_store() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);
        cart.add(sku("a"), 2, None, ItemOptions::new()).unwrap();
        let uuid = cart.content().uuids()[0];

        cart.remove(&uuid).unwrap();

        assert!(cart.find(&uuid).is_none());
        assert!(store.get_entry(cart.key(), uuid).unwrap().is_none());
        assert_eq!(store.entry_count(cart.key()).unwrap(), 1);
    }

    #[test]
    fn update_price_rewrites_store_entry() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);
        cart.add(sku("a"), 1, Some(Money::from_cents(100)), ItemOptions::new())
            .unwrap();
        let uuid = cart.content().uuids()[0];

        cart.update_price(&uuid, Some(Money::from_cents(80))).unwrap();

        assert_eq!(cart.total().cents(), 80);
        let grouped = cart.content_by_id(&sku("a")).unwrap().find(&uuid).unwrap();
        assert_eq!(grouped.price(), Some(Money::from_cents(80)));
        let record = store.get_entry(cart.key(), uuid).unwrap().unwrap();
        assert_eq!(record.price, Some(Money::from_cents(80)));
    }

    #[test]
    fn update_options_merges_and_persists() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);
        let mut options = ItemOptions::new();
        options.insert("size".into(), json!("M"));
        cart.add(sku("shirt"), 1, None, options).unwrap();
        let uuid = cart.content().uuids()[0];

        let mut extra = ItemOptions::new();
        extra.insert("color".into(), json!("red"));
        cart.update_options(&uuid, extra).unwrap();

        let record = store.get_entry(cart.key(), uuid).unwrap().unwrap();
        assert_eq!(record.options.get("size"), Some(&json!("M")));
        assert_eq!(record.options.get("color"), Some(&json!("red")));
    }

    #[test]
    fn update_unknown_uuid_is_noop() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);

        cart.update_price(&ItemUuid::new(), Some(Money::from_cents(1)))
            .unwrap();
        assert!(!store.has_entries(cart.key()).unwrap());
    }

    #[test]
    fn mutations_fail_once_session_closes() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);

        store.close();
        let err = cart.add_one(sku("a")).unwrap_err();
        assert!(matches!(
            err,
            CartError::Store(session_store::SessionStoreError::Inactive)
        ));
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn failed_removals_leave_cart_and_store_in_step() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);
        cart.add(sku("a"), 2, None, ItemOptions::new()).unwrap();
        let uuid = cart.content().uuids()[0];

        store.close();
        assert!(cart.remove(&uuid).is_err());
        assert!(cart.remove_by_item_id(&sku("a"), 1).is_err());
        assert!(cart.destroy_by_item_id(&sku("a")).is_err());
        assert!(cart.update_price(&uuid, Some(Money::from_cents(5))).is_err());
        store.start();

        assert_eq!(cart.count(), 2);
        assert_eq!(cart.count(), store.entry_count(cart.key()).unwrap());
        assert_eq!(cart.find(&uuid).unwrap().price(), None);
    }

    #[test]
    fn removals_keep_store_counts_in_step() {
        let store = InMemorySessionStore::new();
        let mut cart = open(&store);
        cart.add(sku("a"), 3, None, ItemOptions::new()).unwrap();
        cart.add_one(sku("b")).unwrap();

        cart.remove_by_item_id(&sku("a"), 2).unwrap();
        assert_eq!(cart.count(), store.entry_count(cart.key()).unwrap());

        cart.destroy_by_item_id(&sku("a")).unwrap();
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.count(), store.entry_count(cart.key()).unwrap());
        assert!(cart.content_by_id(&sku("a")).is_none());
    }
}
