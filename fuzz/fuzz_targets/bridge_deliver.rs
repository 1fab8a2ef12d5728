//! Fuzz target for inbound host messages
//!
//! Feeds arbitrary raw strings to `Bridge::deliver_raw`. Malformed envelopes,
//! unknown names and bad payloads must be reported, never panic, and leave the
//! session and cache consistent.

#![no_main]

use hostbridge_app::Bridge;
use hostbridge_core::{MemoryStore, Transport};
use hostbridge_harness::{InvariantRegistry, RecordingHost, SessionSnapshot};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|messages: Vec<String>| {
    let host = RecordingHost::new();
    let mut bridge = Bridge::new(Transport::new(host), MemoryStore::new());
    let invariants = InvariantRegistry::standard();
    bridge.start();

    for raw in messages.iter().take(64) {
        let _ = bridge.deliver_raw(raw);
        let _ = bridge.take_actions();
        invariants.assert_all(&SessionSnapshot::from_bridge(&bridge), raw);
    }
});
