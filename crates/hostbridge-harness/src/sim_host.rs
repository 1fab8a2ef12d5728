//! Recording host call primitive.
//!
//! `RecordingHost` stands in for the host side of the bridge. Clones share
//! one log, so a test keeps a handle while the transport owns another.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hostbridge_core::{HostCall, HostFailure};
use hostbridge_proto::Envelope;

#[derive(Debug, Default)]
struct HostLog {
    sent: Vec<String>,
    failure: Option<HostFailure>,
}

/// Host double that records every request.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    log: Arc<Mutex<HostLog>>,
}

impl RecordingHost {
    /// Create a host that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, HostLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reject every following request with `failure`. Requests are still
    /// recorded.
    pub fn fail_with(&self, failure: HostFailure) {
        self.log().failure = Some(failure);
    }

    /// Accept requests again.
    pub fn recover(&self) {
        self.log().failure = None;
    }

    /// Raw request strings, in send order.
    pub fn sent(&self) -> Vec<String> {
        self.log().sent.clone()
    }

    /// Requests decoded as envelopes. Undecodable requests are skipped.
    pub fn envelopes(&self) -> Vec<Envelope> {
        self.log().sent.iter().filter_map(|raw| Envelope::decode(raw).ok()).collect()
    }

    /// Names of sent envelopes, in send order.
    pub fn names(&self) -> Vec<String> {
        self.envelopes().into_iter().map(|e| e.name).collect()
    }

    /// Number of envelopes sent under `name`.
    pub fn count(&self, name: &str) -> usize {
        self.envelopes().iter().filter(|e| e.name == name).count()
    }

    /// Envelopes sent under `name`.
    pub fn sent_named(&self, name: &str) -> Vec<Envelope> {
        self.envelopes().into_iter().filter(|e| e.name == name).collect()
    }

    /// Forget recorded requests.
    pub fn clear(&self) {
        self.log().sent.clear();
    }
}

impl HostCall for RecordingHost {
    fn query(&mut self, request: &str) -> Result<(), HostFailure> {
        let mut log = self.log();
        log.sent.push(request.to_owned());
        match &log.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn clones_share_the_log() {
        let host = RecordingHost::new();
        let mut handle = host.clone();

        handle.query(r#"{"name":"translate","data":"\"Back\""}"#).expect("accepted");

        assert_eq!(host.count("translate"), 1);
        assert_eq!(host.names(), vec!["translate".to_owned()]);
    }

    #[test]
    fn failing_host_still_records() {
        let mut host = RecordingHost::new();
        host.fail_with(HostFailure::new(3, "closed"));

        let envelope = Envelope::new("js_loaded", json!("")).expect("envelope");
        let result = host.query(&envelope.encode().expect("encode"));

        assert!(result.is_err());
        assert_eq!(host.sent().len(), 1);
    }
}
