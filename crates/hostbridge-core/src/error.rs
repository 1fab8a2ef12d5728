//! Error types for dispatch and storage.
//!
//! Transport failures are not represented here: the transport logs and
//! swallows them, see [`crate::Transport`].

use std::io;

use hostbridge_proto::ProtocolError;
use thiserror::Error;

/// Errors returned by inbound message handlers.
///
/// The dispatch table logs these and leaves state untouched; they never stop
/// later deliveries.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Message body could not be decoded into the handler's payload type.
    #[error("malformed payload: {0}")]
    Payload(#[from] ProtocolError),
}

/// Errors from a [`crate::KeyValueStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file could not be read or written.
    #[error("store i/o failed: {0}")]
    Io(#[from] io::Error),

    /// Backing file does not hold a string map.
    #[error("store contents are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}
