//! Session input events.
//!
//! This module defines [`SessionEvent`], the inputs that drive the
//! [`crate::Session`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions ([`UiInput`]).
//! - Host messages and request completions, translated by the bridge and the
//!   runtime.

use hostbridge_proto::payloads::ClientConfig;

use crate::AuthOutcome;

/// User intents from the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiInput {
    /// Email field edited.
    EmailChanged(String),
    /// Password field edited.
    PasswordChanged(String),
    /// Remember-me checkbox toggled.
    RememberChanged(bool),
    /// Login form submitted.
    Submit,
    /// Character row clicked, identified by name.
    SelectCharacter(String),
    /// Enter-game button pressed.
    EnterGame,
    /// Back button pressed.
    Back,
}

/// Events processed by the session state machine.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// User input.
    Input(UiInput),

    /// Host delivered its configuration (`init_config`).
    ConfigReceived(ClientConfig),

    /// Host asked for the login view (`reset_and_show_login`).
    ShowLogin,

    /// Host game session started or ended (`game_state_changed`).
    GameStateChanged {
        /// A game session is running.
        is_online: bool,
    },

    /// An authentication request finished.
    AuthCompleted(AuthOutcome),
}

impl From<UiInput> for SessionEvent {
    fn from(input: UiInput) -> Self {
        Self::Input(input)
    }
}
