use thiserror::Error;

/// Errors that can occur when interacting with the session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The session has not been started or was already closed.
    #[error("No active session")]
    Inactive,

    /// The underlying lock was poisoned by a panicking writer.
    #[error("Session store lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, SessionStoreError>;
