//! Convenience wrapper that forwards to the active cart instance.

use common::{ItemOptions, ItemUuid, Money};
use indexmap::IndexMap;
use serde_json::Value;
use session_store::SessionStore;

use crate::collection::ItemCollection;
use crate::config::CartConfig;
use crate::context::CartContext;
use crate::error::CartError;
use crate::item::{Item, ItemKey};
use crate::manager::CartManager;
use crate::operation::CartOperation;

/// Cart API bound to whichever instance is currently active.
///
/// Every call resolves the active instance first, so the first call of a
/// session opens the default cart.
pub struct Cart<K: ItemKey, S: SessionStore + Clone> {
    context: CartContext<K, S>,
}

impl<K: ItemKey, S: SessionStore + Clone> Cart<K, S> {
    pub fn new(store: S) -> Self {
        Self {
            context: CartContext::new(store),
        }
    }

    pub fn with_config(store: S, config: CartConfig) -> Self {
        Self {
            context: CartContext::with_config(store, config),
        }
    }

    /// Returns the underlying instance registry.
    pub fn context(&mut self) -> &mut CartContext<K, S> {
        &mut self.context
    }

    /// Gets a specific cart instance, opening it on first use.
    pub fn instance(&mut self, name: &str) -> Result<&mut CartManager<K, S>, CartError> {
        self.context.instance(Some(name))
    }

    /// Runs an operation given by name with JSON-encoded arguments.
    ///
    /// Unknown names fail with [`CartError::UnsupportedOperation`] before any
    /// instance is resolved.
    #[tracing::instrument(skip(self, args))]
    pub fn dispatch(&mut self, operation: &str, args: Value) -> Result<Value, CartError> {
        let operation: CartOperation = operation.parse()?;
        tracing::debug!(%operation, mutating = operation.is_mutating(), "dispatching");
        let cart = self.context.active()?;
        operation.invoke(cart, args)
    }

    pub fn find(&mut self, uuid: &ItemUuid) -> Result<Option<&Item<K>>, CartError> {
        Ok(self.context.active()?.find(uuid))
    }

    pub fn add(
        &mut self,
        item_id: K,
        quantity: u32,
        price: Option<Money>,
        options: ItemOptions,
    ) -> Result<&mut CartManager<K, S>, CartError> {
        self.context.active()?.add(item_id, quantity, price, options)
    }

    pub fn remove(&mut self, uuid: &ItemUuid) -> Result<&mut CartManager<K, S>, CartError> {
        self.context.active()?.remove(uuid)
    }

    pub fn remove_by_item_id(
        &mut self,
        item_id: &K,
        quantity: u32,
    ) -> Result<&mut CartManager<K, S>, CartError> {
        self.context.active()?.remove_by_item_id(item_id, quantity)
    }

    pub fn destroy(&mut self) -> Result<(), CartError> {
        self.context.active()?.destroy()
    }

    pub fn destroy_by_item_id(&mut self, item_id: &K) -> Result<(), CartError> {
        self.context.active()?.destroy_by_item_id(item_id)
    }

    pub fn content(&mut self) -> Result<&ItemCollection<K>, CartError> {
        Ok(self.context.active()?.content())
    }

    pub fn content_by_id_group(
        &mut self,
    ) -> Result<&IndexMap<K, ItemCollection<K>>, CartError> {
        Ok(self.context.active()?.content_by_id_group())
    }

    pub fn content_by_id(&mut self, item_id: &K) -> Result<Option<&ItemCollection<K>>, CartError> {
        Ok(self.context.active()?.content_by_id(item_id))
    }

    pub fn count(&mut self) -> Result<usize, CartError> {
        Ok(self.context.active()?.count())
    }

    pub fn count_by_item_id(&mut self) -> Result<usize, CartError> {
        Ok(self.context.active()?.count_by_item_id())
    }

    pub fn total(&mut self) -> Result<Money, CartError> {
        Ok(self.context.active()?.total())
    }
}
