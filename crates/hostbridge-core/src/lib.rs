//! Hostbridge core
//!
//! The reusable halves of the UI/host bridge: the outbound [`Transport`] that
//! wraps the host's single call primitive, the inbound [`DispatchTable`] that
//! routes host messages by name, and the [`TranslationCache`] layered on top
//! of both.
//!
//! # Architecture
//!
//! Nothing here owns a thread or a runtime. The host delivers messages by
//! calling into the dispatch table; state machines queue outbound messages and
//! the caller drains them into the transport. Every component can be driven
//! from a plain test without a host.
//!
//! # Components
//!
//! - [`HostCall`]: the host-provided call primitive
//! - [`Transport`]: fire-and-forget sender over an optional [`HostCall`]
//! - [`DispatchTable`]: last-write-wins name to handler routing
//! - [`TranslationCache`]: deduplicating, batching translation lookups
//! - [`KeyValueStore`]: persisted string storage ([`MemoryStore`],
//!   [`FileStore`])

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dispatch;
mod error;
mod host;
mod store;
mod translate;
mod transport;

pub use dispatch::{Delivery, DispatchTable, Handler};
pub use error::{DispatchError, StoreError};
pub use host::{HostCall, HostFailure};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use translate::{PendingPolicy, TranslationCache, substitute};
pub use transport::{Transport, TransportStats};
