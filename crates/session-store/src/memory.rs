use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use crate::{CartKey, ItemUuid, Result, SessionRecord, SessionStoreError, store::SessionStore};

type Entries = IndexMap<ItemUuid, SessionRecord>;

/// In-memory session store.
///
/// Clones share the same storage and the same session flag, so a cart and
/// the test that inspects it can hold separate handles.
#[derive(Clone)]
pub struct InMemorySessionStore {
    carts: Arc<RwLock<HashMap<CartKey, Entries>>>,
    active: Arc<AtomicBool>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    /// Creates an empty store with an open session.
    pub fn new() -> Self {
        Self {
            carts: Arc::new(RwLock::new(HashMap::new())),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Creates an empty store whose session has not been started.
    pub fn inactive() -> Self {
        let store = Self::new();
        store.close();
        store
    }

    /// Opens the session.
    pub fn start(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    /// Closes the session. Stored entries are kept.
    pub fn close(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Returns how many cart instances currently hold entries.
    pub fn instance_count(&self) -> Result<usize> {
        let carts = self
            .carts
            .read()
            .map_err(|_| SessionStoreError::LockPoisoned("read"))?;
        Ok(carts.values().filter(|entries| !entries.is_empty()).count())
    }

    /// Clears all entries of all cart instances.
    pub fn clear(&self) -> Result<()> {
        self.carts
            .write()
            .map_err(|_| SessionStoreError::LockPoisoned("write"))?
            .clear();
        Ok(())
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(SessionStoreError::Inactive)
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn entries(&self, key: &CartKey) -> Result<Vec<(ItemUuid, SessionRecord)>> {
        self.ensure_active()?;
        let carts = self
            .carts
            .read()
            .map_err(|_| SessionStoreError::LockPoisoned("read"))?;

        Ok(carts
            .get(key)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(uuid, record)| (*uuid, record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn set_entry(&self, key: &CartKey, uuid: ItemUuid, record: SessionRecord) -> Result<()> {
        self.ensure_active()?;
        let mut carts = self
            .carts
            .write()
            .map_err(|_| SessionStoreError::LockPoisoned("write"))?;

        carts.entry(key.clone()).or_default().insert(uuid, record);
        tracing::trace!(%key, %uuid, "session entry written");
        Ok(())
    }

    fn delete_entry(&self, key: &CartKey, uuid: ItemUuid) -> Result<bool> {
        self.ensure_active()?;
        let mut carts = self
            .carts
            .write()
            .map_err(|_| SessionStoreError::LockPoisoned("write"))?;

        let Some(entries) = carts.get_mut(key) else {
            return Ok(false);
        };
        let removed = entries.shift_remove(&uuid).is_some();
        if entries.is_empty() {
            carts.remove(key);
        }
        Ok(removed)
    }

    fn delete_all(&self, key: &CartKey) -> Result<usize> {
        self.ensure_active()?;
        let mut carts = self
            .carts
            .write()
            .map_err(|_| SessionStoreError::LockPoisoned("write"))?;

        let removed = carts.remove(key).map(|entries| entries.len()).unwrap_or(0);
        tracing::trace!(%key, removed, "session entries cleared");
        Ok(removed)
    }
}
