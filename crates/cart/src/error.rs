//! Cart error types.

use session_store::SessionStoreError;
use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// Missing uuids and missing item-id groups are not errors: lookups return
/// `None` and removals of absent lines do nothing.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart could not be opened because no session is active.
    #[error("No active session available for the cart")]
    SessionUnavailable,

    /// An operation name outside the supported set was requested.
    #[error("Unsupported cart operation: {operation}")]
    UnsupportedOperation { operation: String },

    /// Arguments for a dispatched operation could not be decoded.
    #[error("Invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        operation: &'static str,
        reason: String,
    },

    /// An error occurred in the session store.
    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
