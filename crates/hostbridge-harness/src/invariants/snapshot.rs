//! Observable state snapshots for invariant checking.
//!
//! Invariants operate on snapshots rather than live state so every check sees
//! the same point in time.

use std::collections::HashSet;

use hostbridge_app::{Bridge, Notice, Session, View};
use hostbridge_core::{HostCall, KeyValueStore, TranslationCache};

/// Snapshot of session and translation cache state.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Current view.
    pub view: View,
    /// A request is in flight.
    pub loading: bool,
    /// Character names, in list order.
    pub characters: Vec<String>,
    /// Name of the selected character.
    pub selected: Option<String>,
    /// Host runs a game session.
    pub is_game_online: bool,
    /// Current error notice.
    pub error: Option<Notice>,
    /// Keys awaiting a host reply.
    pub pending: HashSet<String>,
    /// Keys with a cached value.
    pub resolved: HashSet<String>,
}

impl SessionSnapshot {
    /// Capture a session and cache.
    pub fn capture<S>(session: &Session<S>, cache: &TranslationCache) -> Self {
        Self {
            view: session.view(),
            loading: session.is_loading(),
            characters: session.characters().iter().map(|c| c.name.clone()).collect(),
            selected: session.selected_name().map(str::to_owned),
            is_game_online: session.is_game_online(),
            error: session.error(),
            pending: cache.pending().map(str::to_owned).collect(),
            resolved: cache.translations().keys().cloned().collect(),
        }
    }

    /// Capture a bridge.
    pub fn from_bridge<H: HostCall, S: KeyValueStore>(bridge: &Bridge<H, S>) -> Self {
        Self::capture(bridge.session(), bridge.cache())
    }
}
