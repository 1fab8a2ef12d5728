//! Hostbridge protocol
//!
//! Wire types for the single message channel between a sandboxed UI surface
//! and the host application that owns all real state.
//!
//! Every message crossing the boundary is an [`Envelope`]: a non-empty
//! `name` plus JSON `data`. Outbound envelopes are serialized to one string
//! before they reach the host call primitive. Inbound `data` may arrive either
//! as structured JSON or as a JSON document wrapped in a string, so payload
//! decoding goes through [`decode_data`] which accepts both.
//!
//! # Components
//!
//! - [`Envelope`]: `{ name, data }` message unit
//! - [`Outbound`]: every message the UI may send to the host
//! - [`names`]: message names in both directions
//! - [`payloads`]: typed `data` bodies (config, auth, game state, translation)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod envelope;
mod errors;
pub mod names;
mod outbound;
pub mod payloads;

pub use envelope::{Envelope, decode_data};
pub use errors::{ProtocolError, Result};
pub use outbound::Outbound;
