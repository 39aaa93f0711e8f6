pub mod error;
pub mod key;
pub mod memory;
pub mod record;
pub mod store;

pub use common::{ItemOptions, ItemUuid, Money};
pub use error::{Result, SessionStoreError};
pub use key::CartKey;
pub use memory::InMemorySessionStore;
pub use record::SessionRecord;
pub use store::{SessionStore, SessionStoreExt};
