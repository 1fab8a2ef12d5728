//! Shell error types.

use std::io;

use hostbridge_core::StoreError;
use thiserror::Error;

/// Errors that stop the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// I/O error on stdin, stdout or stderr.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Screen could not be serialized.
    #[error("screen encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remember-me store could not be opened.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
