//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the runtime from how host messages arrive,
//! how authentication requests are performed and how screens are painted.
//! The shell binary drives the bridge over stdio and HTTP; tests drive it from
//! a scripted queue.

use std::future::Future;

use crate::{AuthOutcome, AuthRequest, Screen, UiInput};

/// Inputs the driver feeds to the runtime.
#[derive(Debug, Clone)]
pub enum DriverEvent {
    /// Raw message text from the host.
    Host(String),
    /// User input.
    Input(UiInput),
    /// An authentication request started by [`Driver::authenticate`] finished.
    AuthCompleted(AuthOutcome),
    /// Stop the runtime.
    Quit,
}

/// Abstracts I/O operations for the runtime.
///
/// # Implementations
///
/// - **Shell**: stdin lines, stdout host wire, reqwest for authentication
/// - **Simulation**: scripted events and outcomes for deterministic tests
pub trait Driver {
    /// Platform-specific error type.
    type Error: std::error::Error + 'static;

    /// Wait for the next event.
    ///
    /// Returns `None` once the event source is exhausted.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<DriverEvent>, Self::Error>>;

    /// Start an authentication request.
    ///
    /// Must not block on the response. The outcome is reported later as
    /// [`DriverEvent::AuthCompleted`].
    fn authenticate(&mut self, request: AuthRequest);

    /// Paint a screen.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, screen: &Screen) -> Result<(), Self::Error>;

    /// Release resources.
    fn stop(&mut self);
}
