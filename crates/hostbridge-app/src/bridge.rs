//! Context object wiring the bridge halves to the session.
//!
//! The [`Bridge`] owns everything that used to be process-wide state: the
//! [`Session`], the [`TranslationCache`], the inbound [`DispatchTable`] and
//! the outbound [`Transport`]. Inbound handlers receive the
//! [`BridgeContext`] explicitly.
//!
//! # Responsibilities
//!
//! - Registers the handlers for every inbound host message.
//! - Feeds session events and queues the resulting actions.
//! - Drains queued translation requests and `Send` actions into the transport.
//! - Hands the remaining actions (authentication, render) to the runtime.

use hostbridge_core::{
    Delivery, DispatchError, DispatchTable, HostCall, KeyValueStore, TranslationCache, Transport,
};
use hostbridge_proto::{
    Envelope, Outbound, decode_data, names,
    payloads::{ClientConfig, GameState, TranslationBatch, TranslationReply},
};
use serde_json::Value;

use crate::{LOGIN_VIEW_KEYS, Screen, Session, SessionAction, SessionEvent, render};

/// Keys every view uses, preloaded at startup.
pub const COMMON_KEYS: &[&str] = &[
    "Back", "Loading...", "Error", "Success", "Cancel", "Confirm", "Yes", "No", "OK", "Close",
    "Save", "Delete", "Edit", "Add", "Remove", "Search", "Filter", "Sort", "Refresh", "Settings",
    "Options", "Help", "About",
];

/// State handed to every inbound handler.
#[derive(Debug)]
pub struct BridgeContext<S> {
    /// Translation cache.
    pub cache: TranslationCache,
    /// Login session.
    pub session: Session<S>,
    /// Actions queued by handlers, drained by [`Bridge::take_actions`].
    pub actions: Vec<SessionAction>,
}

impl<S: KeyValueStore> BridgeContext<S> {
    /// Feed an event to the session and queue its actions.
    pub fn apply(&mut self, event: SessionEvent) {
        let actions = self.session.handle(event);
        self.actions.extend(actions);
    }
}

/// The UI side of the host bridge.
pub struct Bridge<H, S> {
    transport: Transport<H>,
    dispatch: DispatchTable<BridgeContext<S>>,
    context: BridgeContext<S>,
    started: bool,
}

impl<H: HostCall, S: KeyValueStore> Bridge<H, S> {
    /// Create a bridge with an empty default translation cache.
    pub fn new(transport: Transport<H>, store: S) -> Self {
        Self::with_cache(transport, store, TranslationCache::new())
    }

    /// Create a bridge around an existing translation cache.
    pub fn with_cache(transport: Transport<H>, store: S, cache: TranslationCache) -> Self {
        let context = BridgeContext { cache, session: Session::new(store), actions: Vec::new() };
        let mut dispatch = DispatchTable::new();
        register_handlers(&mut dispatch);
        Self { transport, dispatch, context, started: false }
    }

    /// Announce the UI to the host and preload translations.
    ///
    /// Sends `js_loaded` once; later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        self.transport.send_outbound(Outbound::JsLoaded);
        let cache = &mut self.context.cache;
        let requested = cache.resolve_many(COMMON_KEYS) + cache.resolve_many(LOGIN_VIEW_KEYS);
        tracing::debug!(requested, "preloading translations");
        self.flush_translations();
    }

    /// Register or replace an inbound handler.
    ///
    /// Returns `true` if a previous handler was replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> bool
    where
        F: FnMut(&mut BridgeContext<S>, &Value) -> Result<(), DispatchError> + 'static,
    {
        self.dispatch.register(name, handler)
    }

    /// Deliver a decoded host message.
    pub fn deliver(&mut self, envelope: &Envelope) -> Delivery {
        self.dispatch.deliver(&mut self.context, envelope)
    }

    /// Deliver raw host text.
    ///
    /// This is the single entry point the host calls.
    pub fn deliver_raw(&mut self, raw: &str) -> Delivery {
        self.dispatch.deliver_raw(&mut self.context, raw)
    }

    /// Feed a UI or runtime event to the session.
    pub fn handle_event(&mut self, event: impl Into<SessionEvent>) {
        self.context.apply(event.into());
    }

    /// Drain queued work.
    ///
    /// Translation requests and `Send` actions go to the transport. The
    /// remaining actions are returned in order, with any number of renders
    /// collapsed into one trailing [`SessionAction::Render`].
    pub fn take_actions(&mut self) -> Vec<SessionAction> {
        self.flush_translations();

        let mut render = false;
        let mut remaining = Vec::new();
        for action in self.context.actions.drain(..) {
            match action {
                SessionAction::Render => render = true,
                SessionAction::Send(envelope) => self.transport.send_envelope(&envelope),
                SessionAction::Authenticate(request) => {
                    remaining.push(SessionAction::Authenticate(request));
                },
            }
        }

        if render {
            remaining.push(SessionAction::Render);
        }
        remaining
    }

    /// Render the current screen.
    ///
    /// Lookups that miss the cache are sent to the host before returning.
    pub fn screen(&mut self) -> Screen {
        let screen = render(&self.context.session, &mut self.context.cache);
        self.flush_translations();
        screen
    }

    fn flush_translations(&mut self) {
        for request in self.context.cache.take_outgoing() {
            self.transport.send_outbound(request);
        }
    }

    /// Whether `js_loaded` has been sent.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Login session.
    pub fn session(&self) -> &Session<S> {
        &self.context.session
    }

    /// Mutable login session.
    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.context.session
    }

    /// Translation cache.
    pub fn cache(&self) -> &TranslationCache {
        &self.context.cache
    }

    /// Mutable translation cache.
    pub fn cache_mut(&mut self) -> &mut TranslationCache {
        &mut self.context.cache
    }

    /// Outbound transport.
    pub fn transport(&self) -> &Transport<H> {
        &self.transport
    }

    /// Mutable outbound transport, for attaching or detaching the host.
    pub fn transport_mut(&mut self) -> &mut Transport<H> {
        &mut self.transport
    }

    /// Inbound dispatch table.
    pub fn dispatch(&self) -> &DispatchTable<BridgeContext<S>> {
        &self.dispatch
    }
}

/// Handlers for every inbound host message.
fn register_handlers<S: KeyValueStore>(dispatch: &mut DispatchTable<BridgeContext<S>>) {
    dispatch.register(names::INIT_CONFIG, |ctx: &mut BridgeContext<S>, data: &Value| {
        let config: ClientConfig = decode_data(data)?;
        ctx.apply(SessionEvent::ConfigReceived(config));
        Ok(())
    });

    dispatch.register(names::RESET_AND_SHOW_LOGIN, |ctx: &mut BridgeContext<S>, _: &Value| {
        ctx.apply(SessionEvent::ShowLogin);
        Ok(())
    });

    dispatch.register(names::GAME_STATE_CHANGED, |ctx: &mut BridgeContext<S>, data: &Value| {
        let state: GameState = decode_data(data)?;
        ctx.apply(SessionEvent::GameStateChanged { is_online: state.is_online });
        Ok(())
    });

    // Cleanup happens on the `reset_and_show_login` that follows.
    dispatch.register(names::LOGOUT, |_: &mut BridgeContext<S>, _: &Value| Ok(()));

    dispatch.register(names::SET_LOCALE_INFO, |ctx: &mut BridgeContext<S>, data: &Value| {
        let locale: Value = decode_data(data)?;
        if ctx.cache.set_locale(locale) {
            ctx.actions.push(SessionAction::Render);
        }
        Ok(())
    });

    dispatch.register(names::TRANSLATION_RESULT, |ctx: &mut BridgeContext<S>, data: &Value| {
        let reply: TranslationReply = decode_data(data)?;
        ctx.cache.apply_reply(reply);
        ctx.actions.push(SessionAction::Render);
        Ok(())
    });

    dispatch.register(
        names::TRANSLATIONS_RESULT,
        |ctx: &mut BridgeContext<S>, data: &Value| {
            let batch: TranslationBatch = decode_data(data)?;
            let merged = ctx.cache.apply_batch(batch);
            tracing::debug!(merged, "translation batch applied");
            ctx.actions.push(SessionAction::Render);
            Ok(())
        },
    );
}
