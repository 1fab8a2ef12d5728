//! Authentication failures.

use hostbridge_proto::payloads::AuthResponse;
use thiserror::Error;

/// Result of one authentication request.
pub type AuthOutcome = Result<AuthResponse, AuthFailure>;

/// Why an authentication request did not produce a response body.
///
/// Host detail never reaches the user; each kind maps to one generic notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// The service answered with a non-success status.
    #[error("authentication rejected with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// The request never completed (connection, timeout, unreadable body).
    #[error("authentication transport failed: {0}")]
    Transport(String),
}
