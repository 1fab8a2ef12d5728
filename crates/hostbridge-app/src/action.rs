//! Session side-effects.
//!
//! This module defines [`SessionAction`], the instructions the
//! [`crate::Session`] state machine produces for the runtime to execute.

use std::time::Duration;

use hostbridge_proto::{Envelope, payloads::Credentials};

/// Actions produced by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Re-render the view.
    Render,

    /// Start an authentication request. The outcome comes back as
    /// [`crate::SessionEvent::AuthCompleted`].
    Authenticate(AuthRequest),

    /// Send an envelope to the host.
    Send(Envelope),
}

/// Authentication request against the host-configured endpoint.
///
/// Performed by the driver as `POST {url}` with `credentials` as the JSON
/// body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    /// Full endpoint url (`apiUrl` + login endpoint).
    pub url: String,
    /// Request body.
    pub credentials: Credentials,
    /// Give up after this long.
    pub timeout: Duration,
}
