//! Outbound bridge transport.
//!
//! The [`Transport`] is the sole outbound channel to the host. It offers
//! at-most-once, fire-and-forget delivery: each message is serialized and
//! handed to the host call primitive exactly once, failures are logged, and
//! nothing is surfaced to the caller.
//!
//! Without a host (not yet injected, or running in a bare preview) every send
//! is a no-op. UI code must keep working in that mode, so `send` never fails.

use hostbridge_proto::{Envelope, Outbound};
use serde_json::Value;

use crate::HostCall;

/// Delivery counters, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Envelopes the host accepted.
    pub sent: u64,
    /// Envelopes the host rejected.
    pub failed: u64,
    /// Envelopes dropped before reaching the host (detached or unencodable).
    pub dropped: u64,
}

/// Fire-and-forget sender over an optional host call primitive.
#[derive(Debug)]
pub struct Transport<H> {
    host: Option<H>,
    stats: TransportStats,
}

impl<H: HostCall> Transport<H> {
    /// Transport bound to a host.
    pub fn new(host: H) -> Self {
        Self { host: Some(host), stats: TransportStats::default() }
    }

    /// Transport with no host. Every send is a no-op until [`attach`].
    ///
    /// [`attach`]: Transport::attach
    pub fn detached() -> Self {
        Self { host: None, stats: TransportStats::default() }
    }

    /// Inject the host call primitive, replacing any previous one.
    pub fn attach(&mut self, host: H) {
        self.host = Some(host);
    }

    /// Remove the host call primitive.
    pub fn detach(&mut self) -> Option<H> {
        self.host.take()
    }

    /// Whether a host is attached.
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// Attached host, if any.
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Delivery counters so far.
    pub fn stats(&self) -> TransportStats {
        self.stats
    }

    /// Send `data` under `name`.
    pub fn send(&mut self, name: &str, data: Value) {
        match Envelope::new(name, data) {
            Ok(envelope) => self.send_envelope(&envelope),
            Err(err) => {
                self.stats.dropped += 1;
                tracing::warn!(%err, "dropping outbound message");
            },
        }
    }

    /// Send a typed outbound message.
    pub fn send_outbound(&mut self, message: Outbound) {
        let name = message.name();
        match message.into_envelope() {
            Ok(envelope) => self.send_envelope(&envelope),
            Err(err) => {
                self.stats.dropped += 1;
                tracing::warn!(name, %err, "dropping outbound message");
            },
        }
    }

    /// Serialize and hand an envelope to the host.
    pub fn send_envelope(&mut self, envelope: &Envelope) {
        let Some(host) = self.host.as_mut() else {
            self.stats.dropped += 1;
            tracing::debug!(name = %envelope.name, "host bridge unavailable, send skipped");
            return;
        };

        let request = match envelope.encode() {
            Ok(request) => request,
            Err(err) => {
                self.stats.dropped += 1;
                tracing::warn!(name = %envelope.name, %err, "failed to encode envelope");
                return;
            },
        };

        match host.query(&request) {
            Ok(()) => {
                self.stats.sent += 1;
                tracing::trace!(name = %envelope.name, "sent to host");
            },
            Err(failure) => {
                self.stats.failed += 1;
                tracing::error!(
                    name = %envelope.name,
                    code = failure.code,
                    message = %failure.message,
                    "host call failed"
                );
            },
        }
    }
}
