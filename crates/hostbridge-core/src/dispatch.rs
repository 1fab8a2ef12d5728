//! Inbound dispatch table.
//!
//! The host injects state into the UI through exactly one entry point, which
//! looks up the message name here and runs the registered handler
//! synchronously. Deliveries are processed in the order the host sends them;
//! nothing is queued, reordered or coalesced at this layer.
//!
//! # Invariants
//!
//! - At most one handler per name. Registering a name again replaces the
//!   previous handler (last write wins). Hosts rely on this when a component
//!   re-registers after a reload, so it is observable behaviour.
//! - Unknown names are dropped silently. Newer hosts may send messages an
//!   older UI does not know about.
//! - A failing handler is logged and leaves the table usable.

use std::{collections::HashMap, fmt};

use hostbridge_proto::{Envelope, ProtocolError};
use serde_json::Value;

use crate::DispatchError;

/// Handler invoked with the shared context and the message body.
pub type Handler<C> = Box<dyn FnMut(&mut C, &Value) -> Result<(), DispatchError>>;

/// Outcome of one delivery.
#[derive(Debug)]
pub enum Delivery {
    /// A handler ran and succeeded.
    Handled,
    /// No handler is registered for the name.
    Unrouted,
    /// The handler rejected the message body.
    Failed(DispatchError),
    /// The raw text was not an envelope.
    Malformed(ProtocolError),
}

impl Delivery {
    /// Whether a handler ran and succeeded.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Name to handler routing for inbound host messages.
///
/// Generic over the context type `C` handed to every handler, so handlers
/// mutate an explicit context object instead of shared globals.
pub struct DispatchTable<C> {
    handlers: HashMap<String, Handler<C>>,
}

impl<C> DispatchTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Register `handler` for `name`.
    ///
    /// Returns `true` if a previous handler was replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> bool
    where
        F: FnMut(&mut C, &Value) -> Result<(), DispatchError> + 'static,
    {
        let name = name.into();
        let replaced = self.handlers.insert(name.clone(), Box::new(handler)).is_some();
        if replaced {
            tracing::debug!(%name, "replaced inbound handler");
        }
        replaced
    }

    /// Whether a handler is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route an envelope to its handler.
    pub fn deliver(&mut self, context: &mut C, envelope: &Envelope) -> Delivery {
        let Some(handler) = self.handlers.get_mut(&envelope.name) else {
            tracing::debug!(name = %envelope.name, "no handler for inbound message");
            return Delivery::Unrouted;
        };

        match handler(context, &envelope.data) {
            Ok(()) => Delivery::Handled,
            Err(err) => {
                tracing::warn!(name = %envelope.name, %err, "inbound handler failed");
                Delivery::Failed(err)
            },
        }
    }

    /// Parse raw host text as an envelope and route it.
    pub fn deliver_raw(&mut self, context: &mut C, raw: &str) -> Delivery {
        match Envelope::decode(raw) {
            Ok(envelope) => self.deliver(context, &envelope),
            Err(err) => {
                tracing::warn!(%err, "dropping malformed inbound message");
                Delivery::Malformed(err)
            },
        }
    }
}

impl<C> Default for DispatchTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for DispatchTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("DispatchTable").field("handlers", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use hostbridge_proto::decode_data;
    use serde_json::json;

    use super::*;

    fn envelope(name: &str, data: Value) -> Envelope {
        Envelope::new(name, data).expect("envelope")
    }

    #[test]
    fn delivers_to_registered_handler() {
        let mut table: DispatchTable<Vec<String>> = DispatchTable::new();
        table.register("echo", |seen: &mut Vec<String>, data: &Value| {
            seen.push(decode_data(data)?);
            Ok(())
        });

        let mut seen = Vec::new();
        assert!(table.deliver(&mut seen, &envelope("echo", json!("hi"))).is_handled());
        assert_eq!(seen, vec!["hi".to_owned()]);
    }

    #[test]
    fn reregistering_replaces_previous_handler() {
        let mut table: DispatchTable<u32> = DispatchTable::new();
        assert!(!table.register("tick", |n: &mut u32, _: &Value| {
            *n += 1;
            Ok(())
        }));
        assert!(table.register("tick", |n: &mut u32, _: &Value| {
            *n += 100;
            Ok(())
        }));

        let mut counter = 0;
        table.deliver(&mut counter, &envelope("tick", Value::Null));
        assert_eq!(counter, 100);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unknown_names_are_dropped() {
        let mut table: DispatchTable<()> = DispatchTable::new();
        assert!(matches!(
            table.deliver(&mut (), &envelope("from_the_future", json!({}))),
            Delivery::Unrouted
        ));
    }

    #[test]
    fn failing_handler_keeps_table_usable() {
        let mut table: DispatchTable<Vec<bool>> = DispatchTable::new();
        table.register("flag", |flags: &mut Vec<bool>, data: &Value| {
            flags.push(decode_data(data)?);
            Ok(())
        });

        let mut flags = Vec::new();
        assert!(matches!(
            table.deliver(&mut flags, &envelope("flag", json!("{broken"))),
            Delivery::Failed(DispatchError::Payload(_))
        ));
        assert!(table.deliver(&mut flags, &envelope("flag", json!(true))).is_handled());
        assert_eq!(flags, vec![true]);
    }

    #[test]
    fn raw_text_is_parsed_before_routing() {
        let mut table: DispatchTable<u32> = DispatchTable::new();
        table.register("tick", |n: &mut u32, _: &Value| {
            *n += 1;
            Ok(())
        });

        let mut counter = 0;
        assert!(table.deliver_raw(&mut counter, r#"{"name":"tick"}"#).is_handled());
        assert!(matches!(table.deliver_raw(&mut counter, "tick"), Delivery::Malformed(_)));
        assert_eq!(counter, 1);
    }

    #[test]
    fn deliveries_run_in_send_order() {
        let mut table: DispatchTable<Vec<u64>> = DispatchTable::new();
        table.register("n", |seen: &mut Vec<u64>, data: &Value| {
            seen.push(decode_data(data)?);
            Ok(())
        });

        let mut seen = Vec::new();
        for n in [3, 1, 2] {
            table.deliver(&mut seen, &envelope("n", json!(n)));
        }
        assert_eq!(seen, vec![3, 1, 2]);
    }
}
