//! Value types shared by the session store and the cart.

pub mod money;
pub mod types;

pub use money::Money;
pub use types::{ItemOptions, ItemUuid};
