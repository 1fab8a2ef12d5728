//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` replays a scripted queue of events and answers authentication
//! requests from a scripted queue of outcomes. It implements [`Driver`] so
//! the same [`hostbridge_app::Runtime`] orchestration code runs in both the
//! shell and tests.

use std::{collections::VecDeque, convert::Infallible};

use hostbridge_app::{
    AuthFailure, AuthOutcome, AuthRequest, Driver, DriverEvent, Screen, UiInput,
};
use hostbridge_proto::Envelope;
use serde_json::Value;

/// Simulation driver for deterministic testing.
#[derive(Debug, Default)]
pub struct SimDriver {
    events: VecDeque<DriverEvent>,
    outcomes: VecDeque<AuthOutcome>,
    auth_requests: Vec<AuthRequest>,
    screens: Vec<Screen>,
    stopped: bool,
}

impl SimDriver {
    /// Create a driver with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw host text.
    pub fn push_raw(&mut self, raw: impl Into<String>) {
        self.events.push_back(DriverEvent::Host(raw.into()));
    }

    /// Queue a host message.
    ///
    /// Falls back to the raw JSON text if the envelope cannot be encoded.
    pub fn push_host(&mut self, name: &str, data: Value) {
        let raw = Envelope::new(name, data.clone())
            .and_then(|envelope| envelope.encode())
            .unwrap_or_else(|_| serde_json::json!({ "name": name, "data": data }).to_string());
        self.push_raw(raw);
    }

    /// Queue user input.
    pub fn push_input(&mut self, input: UiInput) {
        self.events.push_back(DriverEvent::Input(input));
    }

    /// Queue a quit.
    pub fn push_quit(&mut self) {
        self.events.push_back(DriverEvent::Quit);
    }

    /// Script the outcome of the next unanswered authentication request.
    pub fn push_outcome(&mut self, outcome: AuthOutcome) {
        self.outcomes.push_back(outcome);
    }

    /// Events not yet polled.
    pub fn has_pending(&self) -> bool {
        !self.events.is_empty()
    }

    /// Authentication requests started so far.
    pub fn auth_requests(&self) -> &[AuthRequest] {
        &self.auth_requests
    }

    /// Screens rendered so far.
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Most recent screen.
    pub fn last_screen(&self) -> Option<&Screen> {
        self.screens.last()
    }

    /// Whether [`Driver::stop`] ran.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Driver for SimDriver {
    type Error = Infallible;

    async fn poll_event(&mut self) -> Result<Option<DriverEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }

    /// Completes after every event queued so far, so host messages already in
    /// flight interleave with the request.
    fn authenticate(&mut self, request: AuthRequest) {
        self.auth_requests.push(request);
        let outcome = self.outcomes.pop_front().unwrap_or_else(|| {
            tracing::debug!("no scripted outcome, failing authentication");
            Err(AuthFailure::Transport("no scripted outcome".to_owned()))
        });
        self.events.push_back(DriverEvent::AuthCompleted(outcome));
    }

    fn render(&mut self, screen: &Screen) -> Result<(), Self::Error> {
        self.screens.push(screen.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
