//! Deterministic test harness for the UI/host bridge.
//!
//! Test doubles for the two I/O seams, plus invariant checks over observable
//! session and cache state.
//!
//! # Test doubles
//!
//! - [`RecordingHost`]: a [`hostbridge_core::HostCall`] that records every
//!   outbound envelope and can be told to fail
//! - [`SimDriver`]: a [`hostbridge_app::Driver`] fed from a scripted queue, so
//!   the production [`hostbridge_app::Runtime`] runs unchanged in tests
//!
//! # Invariant Testing
//!
//! The `invariants` module verifies WHAT must be true after every event, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the session
//! and cache invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_host;

pub use invariants::{
    CharactersViewSettled, Invariant, InvariantRegistry, InvariantResult, NoSelectionOnLogin,
    PendingDisjointFromResolved, SelectedInCharacters, SessionSnapshot, Violation,
};
pub use sim_driver::SimDriver;
pub use sim_host::RecordingHost;
