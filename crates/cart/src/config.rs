//! Cart configuration loaded from environment variables.

use session_store::key::DEFAULT_NAMESPACE;

/// Name of the instance used when no name is given.
pub const DEFAULT_INSTANCE: &str = "default";

/// Cart configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CART_SESSION_NAMESPACE` — session store namespace (default: `"cart"`)
/// - `CART_DEFAULT_INSTANCE` — name of the default instance (default: `"default"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub namespace: String,
    pub default_instance: String,
}

impl CartConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, fallback: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        Self {
            namespace: read("CART_SESSION_NAMESPACE", DEFAULT_NAMESPACE),
            default_instance: read("CART_DEFAULT_INSTANCE", DEFAULT_INSTANCE),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_instance: DEFAULT_INSTANCE.to_string(),
        }
    }
}
