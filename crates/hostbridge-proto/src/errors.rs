//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while building, encoding or decoding envelopes.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Envelope name was empty.
    ///
    /// Names address handlers in the dispatch table, so an empty name can
    /// never be routed.
    #[error("envelope name must not be empty")]
    EmptyName,

    /// JSON encoding or decoding failed.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
