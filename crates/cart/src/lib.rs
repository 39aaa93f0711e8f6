//! Session-scoped shopping cart.
//!
//! This crate provides:
//! - `Item`, `ItemCollection` and `ItemRepository`, the in-memory cart model
//!   with a per-item-id grouping kept in sync with the full item list
//! - `CartManager`, one cart instance mirrored into a session store
//! - `CartContext`, the registry of named instances for one session
//! - `Cart`, a wrapper forwarding to the active instance, with by-name dispatch

pub mod collection;
pub mod config;
pub mod context;
pub mod error;
pub mod facade;
pub mod item;
pub mod manager;
pub mod operation;
pub mod repository;

pub use collection::ItemCollection;
pub use common::{ItemOptions, ItemUuid, Money};
pub use config::CartConfig;
pub use context::CartContext;
pub use error::CartError;
pub use facade::Cart;
pub use item::{Item, ItemKey};
pub use manager::CartManager;
pub use operation::CartOperation;
pub use repository::ItemRepository;
