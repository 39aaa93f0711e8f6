use serde::{Deserialize, Serialize};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "cart";

/// Addresses every entry stored for one cart instance.
///
/// Together with an [`ItemUuid`](crate::ItemUuid) it forms the compound key
/// `(namespace, instance, uuid)` of a single stored line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartKey {
    namespace: String,
    instance: String,
}

impl CartKey {
    /// Creates a key for `instance` under `namespace`.
    pub fn new(namespace: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            instance: instance.into(),
        }
    }

    /// Creates a key for `instance` under the default namespace.
    pub fn for_instance(instance: impl Into<String>) -> Self {
        Self::new(DEFAULT_NAMESPACE, instance)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl std::fmt::Display for CartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.instance)
    }
}
