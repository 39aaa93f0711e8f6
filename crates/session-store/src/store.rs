use crate::{CartKey, ItemUuid, Result, SessionRecord};

/// Core trait for session store implementations.
///
/// A session store persists cart lines for the lifetime of a user session.
/// Entries are grouped by [`CartKey`] and addressed by [`ItemUuid`] within
/// a group. All implementations must be thread-safe (Send + Sync).
pub trait SessionStore: Send + Sync {
    /// Returns true while the session is open.
    ///
    /// Carts refuse to open against an inactive session.
    fn is_active(&self) -> bool;

    /// Retrieves every entry stored for a cart instance.
    ///
    /// Entries are returned in the order they were first written.
    fn entries(&self, key: &CartKey) -> Result<Vec<(ItemUuid, SessionRecord)>>;

    /// Writes an entry, replacing any previous entry with the same uuid.
    ///
    /// A replaced entry keeps its position.
    fn set_entry(&self, key: &CartKey, uuid: ItemUuid, record: SessionRecord) -> Result<()>;

    /// Deletes one entry. Returns true if it existed.
    fn delete_entry(&self, key: &CartKey, uuid: ItemUuid) -> Result<bool>;

    /// Deletes every entry of a cart instance. Returns how many were removed.
    fn delete_all(&self, key: &CartKey) -> Result<usize>;
}

/// Extension trait providing convenience methods for session stores.
pub trait SessionStoreExt: SessionStore {
    /// Looks up a single entry.
    fn get_entry(&self, key: &CartKey, uuid: ItemUuid) -> Result<Option<SessionRecord>> {
        Ok(self
            .entries(key)?
            .into_iter()
            .find(|(stored, _)| *stored == uuid)
            .map(|(_, record)| record))
    }

    /// Returns how many entries a cart instance holds.
    fn entry_count(&self, key: &CartKey) -> Result<usize> {
        Ok(self.entries(key)?.len())
    }

    /// Checks if a cart instance has any stored entries.
    fn has_entries(&self, key: &CartKey) -> Result<bool> {
        Ok(self.entry_count(key)? > 0)
    }
}

// Blanket implementation for all SessionStore implementations
impl<T: SessionStore + ?Sized> SessionStoreExt for T {}
