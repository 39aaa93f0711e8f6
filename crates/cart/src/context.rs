//! Registry of named cart instances.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use session_store::{CartKey, SessionStore};

use crate::config::{CartConfig, DEFAULT_INSTANCE};
use crate::error::CartError;
use crate::item::ItemKey;
use crate::manager::CartManager;

/// Owns every cart instance opened during one session.
///
/// Resolution rules:
/// - no name → the active instance, opening the default one if nothing is active yet
/// - `"default"` or the configured default name → the default instance
/// - any other name → that instance
///
/// Opening a new instance makes it active. Returning an instance that is
/// already open leaves the active pointer untouched.
pub struct CartContext<K: ItemKey, S: SessionStore + Clone> {
    store: S,
    config: CartConfig,
    instances: HashMap<String, CartManager<K, S>>,
    active: Option<String>,
}

impl<K: ItemKey, S: SessionStore + Clone> CartContext<K, S> {
    /// Creates a context with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, CartConfig::default())
    }

    pub fn with_config(store: S, config: CartConfig) -> Self {
        Self {
            store,
            config,
            instances: HashMap::new(),
            active: None,
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves an instance by name, opening it on first use.
    pub fn instance(&mut self, name: Option<&str>) -> Result<&mut CartManager<K, S>, CartError> {
        let name = match name {
            Some(DEFAULT_INSTANCE) => self.config.default_instance.clone(),
            Some(name) => name.to_string(),
            None => self
                .active
                .clone()
                .unwrap_or_else(|| self.config.default_instance.clone()),
        };
        self.resolve(name)
    }

    /// Returns the active instance.
    pub fn active(&mut self) -> Result<&mut CartManager<K, S>, CartError> {
        self.instance(None)
    }

    /// Returns the default instance.
    pub fn default_instance(&mut self) -> Result<&mut CartManager<K, S>, CartError> {
        let name = self.config.default_instance.clone();
        self.resolve(name)
    }

    /// Name of the active instance, if any instance was opened.
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns true if `name` has been opened in this context.
    pub fn is_open(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    /// Names of all open instances, sorted.
    pub fn instance_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.instances.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn resolve(&mut self, name: String) -> Result<&mut CartManager<K, S>, CartError> {
        match self.instances.entry(name) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let key = CartKey::new(self.config.namespace.clone(), entry.key().clone());
                let manager = CartManager::open(self.store.clone(), key)?;
                self.active = Some(entry.key().clone());
                Ok(entry.insert(manager))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_store::InMemorySessionStore;

    fn context() -> CartContext<String, InMemorySessionStore> {
        CartContext::new(InMemorySessionStore::new())
    }

    #[test]
    fn unnamed_resolves_to_default_first() {
        let mut ctx = context();
        let cart = ctx.instance(None).unwrap();
        assert_eq!(cart.name(), "default");
        assert_eq!(ctx.active_name(), Some("default"));
    }

    #[test]
    fn default_name_shares_the_unnamed_instance() {
        let mut ctx = context();
        ctx.instance(None).unwrap().add_one("a".to_string()).unwrap();

        assert_eq!(ctx.instance(Some("default")).unwrap().count(), 1);
        assert_eq!(ctx.instance_names(), vec!["default"]);
    }

    #[test]
    fn new_named_instance_becomes_active() {
        let mut ctx = context();
        ctx.instance(None).unwrap();
        ctx.instance(Some("wishlist")).unwrap();

        assert_eq!(ctx.active_name(), Some("wishlist"));
        assert_eq!(ctx.active().unwrap().name(), "wishlist");
    }

    #[test]
    fn existing_named_instance_does_not_change_active() {
        let mut ctx = context();
        ctx.instance(Some("wishlist")).unwrap();
        ctx.instance(Some("saved")).unwrap();
        assert_eq!(ctx.active_name(), Some("saved"));

        ctx.instance(Some("wishlist")).unwrap();
        assert_eq!(ctx.active_name(), Some("saved"));
    }

    #[test]
    fn default_instance_is_opened_lazily_and_activated() {
        let mut ctx = context();
        ctx.instance(Some("wishlist")).unwrap();
        assert!(!ctx.is_open("default"));

        ctx.default_instance().unwrap();
        assert!(ctx.is_open("default"));
        assert_eq!(ctx.active_name(), Some("default"));
    }

    #[test]
    fn instances_are_independent() {
        let mut ctx = context();
        ctx.instance(Some("a")).unwrap().add_one("x".to_string()).unwrap();
        ctx.instance(Some("b")).unwrap();

        assert_eq!(ctx.instance(Some("a")).unwrap().count(), 1);
        assert_eq!(ctx.instance(Some("b")).unwrap().count(), 0);
    }

    #[test]
    fn failed_open_registers_nothing() {
        let store = InMemorySessionStore::inactive();
        let mut ctx: CartContext<String, _> = CartContext::new(store.clone());

        assert!(matches!(
            ctx.instance(None),
            Err(CartError::SessionUnavailable)
        ));
        assert!(matches!(
            ctx.instance(Some("wishlist")),
            Err(CartError::SessionUnavailable)
        ));
        assert!(ctx.instance_names().is_empty());
        assert_eq!(ctx.active_name(), None);

        store.start();
        assert_eq!(ctx.instance(None).unwrap().name(), "default");
    }

    #[test]
    fn configured_default_instance_and_namespace() {
        let config = CartConfig {
            namespace: "shop".to_string(),
            default_instance: "main".to_string(),
        };
        let mut ctx: CartContext<String, _> =
            CartContext::with_config(InMemorySessionStore::new(), config);

        let cart = ctx.instance(None).unwrap();
        assert_eq!(cart.key(), &CartKey::new("shop", "main"));
        assert!(ctx.is_open("main"));
        assert_eq!(ctx.instance(Some("main")).unwrap().name(), "main");
    }

    #[test]
    fn default_name_follows_configured_default_instance() {
        let config = CartConfig {
            default_instance: "main".to_string(),
            ..CartConfig::default()
        };
        let mut ctx: CartContext<String, _> =
            CartContext::with_config(InMemorySessionStore::new(), config);
        ctx.instance(None).unwrap().add_one("a".to_string()).unwrap();

        let cart = ctx.instance(Some("default")).unwrap();
        assert_eq!(cart.name(), "main");
        assert_eq!(cart.count(), 1);
        assert_eq!(ctx.instance_names(), vec!["main"]);
    }
}
