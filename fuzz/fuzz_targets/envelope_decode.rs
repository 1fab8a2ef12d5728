//! Fuzz target for Envelope::decode
//!
//! Arbitrary strings must decode to an envelope or an error, never a panic.
//! Anything that decodes must encode again and decode to the same envelope.

#![no_main]

use hostbridge_proto::Envelope;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(envelope) = Envelope::decode(raw) {
        let encoded = envelope.encode().expect("decoded envelope re-encodes");
        let again = Envelope::decode(&encoded).expect("encoded envelope decodes");
        assert_eq!(envelope, again);
    }
});
