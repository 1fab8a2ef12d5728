//! The host-provided call primitive.

use thiserror::Error;

/// Failure reported by the host for one call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("host call failed ({code}): {message}")]
pub struct HostFailure {
    /// Host-specific error code.
    pub code: i32,
    /// Human-readable reason.
    pub message: String,
}

impl HostFailure {
    /// Create a failure with the given code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// The single call primitive the host injects into the UI.
///
/// The host is co-located and trusted. A call either succeeds with no payload
/// or fails with a code and message; there is no reply channel here. Replies
/// come back later as separate inbound messages.
pub trait HostCall {
    /// Hand one serialized envelope to the host.
    fn query(&mut self, request: &str) -> Result<(), HostFailure>;
}

impl<H: HostCall + ?Sized> HostCall for Box<H> {
    fn query(&mut self, request: &str) -> Result<(), HostFailure> {
        (**self).query(request)
    }
}
