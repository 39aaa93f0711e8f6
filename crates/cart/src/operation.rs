//! Name-addressable cart operations.

use std::str::FromStr;

use common::{ItemOptions, ItemUuid, Money};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use session_store::SessionStore;

use crate::error::CartError;
use crate::item::{Item, ItemKey};
use crate::manager::CartManager;

/// The public operations of a cart, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Find,
    Add,
    Remove,
    RemoveByItemId,
    Destroy,
    DestroyByItemId,
    Content,
    ContentByIdGroup,
    ContentById,
    Count,
    CountByItemId,
    Total,
}

impl CartOperation {
    pub const ALL: [CartOperation; 12] = [
        CartOperation::Find,
        CartOperation::Add,
        CartOperation::Remove,
        CartOperation::RemoveByItemId,
        CartOperation::Destroy,
        CartOperation::DestroyByItemId,
        CartOperation::Content,
        CartOperation::ContentByIdGroup,
        CartOperation::ContentById,
        CartOperation::Count,
        CartOperation::CountByItemId,
        CartOperation::Total,
    ];

    /// Returns the operation name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CartOperation::Find => "find",
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::RemoveByItemId => "removeByItemId",
            CartOperation::Destroy => "destroy",
            CartOperation::DestroyByItemId => "destroyByItemId",
            CartOperation::Content => "content",
            CartOperation::ContentByIdGroup => "contentByIdGroup",
            CartOperation::ContentById => "contentById",
            CartOperation::Count => "count",
            CartOperation::CountByItemId => "countByItemId",
            CartOperation::Total => "total",
        }
    }

    /// Returns true if the operation writes to the session store.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            CartOperation::Add
                | CartOperation::Remove
                | CartOperation::RemoveByItemId
                | CartOperation::Destroy
                | CartOperation::DestroyByItemId
        )
    }

    /// True for the camelCase name and for its snake_case spelling.
    fn is_named(self, name: &str) -> bool {
        let camel = self.as_str();
        if name == camel {
            return true;
        }
        let mut snake = String::with_capacity(camel.len() + 4);
        for c in camel.chars() {
            if c.is_ascii_uppercase() {
                snake.push('_');
                snake.push(c.to_ascii_lowercase());
            } else {
                snake.push(c);
            }
        }
        name == snake
    }

    /// Runs the operation against `cart` with JSON-encoded arguments.
    ///
    /// Mutating operations return `null`; read operations return their
    /// result encoded as JSON. Money amounts are encoded in cents.
    pub fn invoke<K, S>(self, cart: &mut CartManager<K, S>, args: Value) -> Result<Value, CartError>
    where
        K: ItemKey,
        S: SessionStore,
    {
        match self {
            CartOperation::Find => {
                let args: UuidArgs = self.decode(args)?;
                Ok(serde_json::to_value(cart.find(&args.uuid))?)
            }
            CartOperation::Add => {
                let args: AddArgs<K> = self.decode(args)?;
                cart.add(args.item_id, args.quantity, args.price, args.options)?;
                Ok(Value::Null)
            }
            CartOperation::Remove => {
                let args: UuidArgs = self.decode(args)?;
                cart.remove(&args.uuid)?;
                Ok(Value::Null)
            }
            CartOperation::RemoveByItemId => {
                let args: RemoveByItemIdArgs<K> = self.decode(args)?;
                cart.remove_by_item_id(&args.item_id, args.quantity)?;
                Ok(Value::Null)
            }
            CartOperation::Destroy => {
                cart.destroy()?;
                Ok(Value::Null)
            }
            CartOperation::DestroyByItemId => {
                let args: ItemIdArgs<K> = self.decode(args)?;
                cart.destroy_by_item_id(&args.item_id)?;
                Ok(Value::Null)
            }
            CartOperation::Content => {
                let items: Vec<_> = cart.content().iter().collect();
                Ok(serde_json::to_value(items)?)
            }
            CartOperation::ContentByIdGroup => {
                let groups: Vec<_> = cart
                    .content_by_id_group()
                    .iter()
                    .map(|(item_id, group)| GroupView {
                        item_id,
                        items: group.iter().collect(),
                    })
                    .collect();
                Ok(serde_json::to_value(groups)?)
            }
            CartOperation::ContentById => {
                let args: ItemIdArgs<K> = self.decode(args)?;
                let items = cart
                    .content_by_id(&args.item_id)
                    .map(|group| group.iter().collect::<Vec<_>>());
                Ok(serde_json::to_value(items)?)
            }
            CartOperation::Count => Ok(Value::from(cart.count())),
            CartOperation::CountByItemId => Ok(Value::from(cart.count_by_item_id())),
            CartOperation::Total => Ok(serde_json::to_value(cart.total())?),
        }
    }

    fn decode<T: DeserializeOwned>(self, args: Value) -> Result<T, CartError> {
        serde_json::from_value(args).map_err(|e| CartError::InvalidArguments {
            operation: self.as_str(),
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CartOperation {
    type Err = CartError;

    /// Accepts both the camelCase names and their snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CartOperation::ALL
            .into_iter()
            .find(|op| op.is_named(s))
            .ok_or_else(|| CartError::UnsupportedOperation {
                operation: s.to_string(),
            })
    }
}

#[derive(Serialize)]
struct GroupView<'a, K> {
    item_id: &'a K,
    items: Vec<&'a Item<K>>,
}

fn one() -> u32 {
    1
}

#[derive(Deserialize)]
struct UuidArgs {
    uuid: ItemUuid,
}

#[derive(Deserialize)]
struct ItemIdArgs<K> {
    item_id: K,
}

#[derive(Deserialize)]
struct AddArgs<K> {
    item_id: K,
    #[serde(default = "one")]
    quantity: u32,
    #[serde(default)]
    price: Option<Money>,
    #[serde(default)]
    options: ItemOptions,
}

#[derive(Deserialize)]
struct RemoveByItemIdArgs<K> {
    item_id: K,
    #[serde(default = "one")]
    quantity: u32,
}
