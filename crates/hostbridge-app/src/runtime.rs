//! Generic runtime for bridge orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`Bridge`]: session, translation cache, dispatch and transport
//! - [`Driver`]: platform-specific I/O

use hostbridge_core::{HostCall, KeyValueStore};

use crate::{Bridge, Driver, DriverEvent, SessionAction, SessionEvent};

/// Generic runtime that orchestrates a [`Bridge`] and a [`Driver`].
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `H`: Host call primitive behind the transport
/// - `S`: Key-value store behind the remember-me record
pub struct Runtime<D, H, S>
where
    D: Driver,
{
    driver: D,
    bridge: Bridge<H, S>,
}

impl<D, H, S> Runtime<D, H, S>
where
    D: Driver,
    H: HostCall,
    S: KeyValueStore,
{
    /// Create a runtime around a bridge.
    pub fn new(driver: D, bridge: Bridge<H, S>) -> Self {
        Self { driver, bridge }
    }

    /// Run the main event loop.
    ///
    /// 1. Announces the UI to the host
    /// 2. Polls the driver for host messages, input and auth completions
    /// 3. Executes the resulting actions
    ///
    /// Returns when the driver runs out of events or delivers
    /// [`DriverEvent::Quit`].
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        self.bridge.start();

        while let Some(event) = self.driver.poll_event().await? {
            if !self.dispatch(event)? {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one event.
    ///
    /// Returns `false` if the runtime should stop.
    pub fn dispatch(&mut self, event: DriverEvent) -> Result<bool, D::Error> {
        match event {
            DriverEvent::Host(raw) => {
                self.bridge.deliver_raw(&raw);
            },
            DriverEvent::Input(input) => self.bridge.handle_event(input),
            DriverEvent::AuthCompleted(outcome) => {
                self.bridge.handle_event(SessionEvent::AuthCompleted(outcome));
            },
            DriverEvent::Quit => return Ok(false),
        }

        self.process_actions()?;
        Ok(true)
    }

    /// Execute queued bridge actions.
    fn process_actions(&mut self) -> Result<(), D::Error> {
        for action in self.bridge.take_actions() {
            match action {
                SessionAction::Render => {
                    let screen = self.bridge.screen();
                    self.driver.render(&screen)?;
                },
                SessionAction::Authenticate(request) => {
                    tracing::debug!(url = %request.url, "starting authentication");
                    self.driver.authenticate(request);
                },
                // take_actions routes sends to the transport
                SessionAction::Send(envelope) => {
                    tracing::warn!(name = %envelope.name, "unexpected send action");
                },
            }
        }
        Ok(())
    }

    /// The bridge.
    pub fn bridge(&self) -> &Bridge<H, S> {
        &self.bridge
    }

    /// Mutable bridge.
    pub fn bridge_mut(&mut self) -> &mut Bridge<H, S> {
        &mut self.bridge
    }

    /// The driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Consume the runtime and return its parts.
    pub fn into_parts(self) -> (D, Bridge<H, S>) {
        (self.driver, self.bridge)
    }
}
