//! View model.
//!
//! [`render`] turns a [`Session`] into a [`Screen`] with every user-visible
//! string resolved through the [`TranslationCache`]. Strings whose
//! translation has not arrived yet show the raw key; the lookup queues a
//! request and the reply triggers another render.
//!
//! The screen also carries the enabled flags the UI uses to disable its
//! affordances while the host runs a game session or a request is in flight.

use hostbridge_core::TranslationCache;
use hostbridge_proto::payloads::Character;
use serde::Serialize;

use crate::{Notice, Session, View};

/// Keys the login module uses, preloaded at startup.
pub const LOGIN_VIEW_KEYS: &[&str] = &[
    "Characters",
    "Select a character to enter the game",
    "Account Status",
    "Status",
    "Type",
    "Level",
    "Back",
    "Enter the Game",
    "Email or Account ID",
    "Remember me",
    "Enter with your credentials to access the game",
    "Connecting...",
    "Premium Account",
    "Normal",
    "Normal Account",
    "Free account",
    "days",
    "Please fill in all fields.",
    "Email or password incorrect",
    "Connection error",
    "Error connecting to game",
    "No characters found",
    "N/A",
    "Enter your email or account ID",
    "Enter your password",
];

/// Rendered screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Screen {
    /// Credentials form.
    Login(LoginScreen),
    /// Character list.
    Characters(CharacterScreen),
}

impl Screen {
    /// Which view this screen shows.
    pub fn view(&self) -> View {
        match self {
            Self::Login(_) => View::Login,
            Self::Characters(_) => View::Characters,
        }
    }
}

/// Credentials form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginScreen {
    /// Window title.
    pub title: String,
    /// Line under the title.
    pub subtitle: String,
    /// Resolved error notice.
    pub error: Option<String>,
    /// Resolved success notice.
    pub success: Option<String>,
    /// Email field label.
    pub email_label: String,
    /// Email field placeholder.
    pub email_placeholder: String,
    /// Email as typed.
    pub email: String,
    /// Password field label.
    pub password_label: String,
    /// Password field placeholder.
    pub password_placeholder: String,
    /// Remember-me checkbox label.
    pub remember_label: String,
    /// Remember-me checkbox state.
    pub remember: bool,
    /// Fields accept input.
    pub inputs_enabled: bool,
    /// Submit button text.
    pub submit_label: String,
    /// Submit button accepts clicks.
    pub submit_enabled: bool,
    /// Show the busy indicator on the submit button.
    pub loading: bool,
}

/// Character list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterScreen {
    /// Window title.
    pub title: String,
    /// Line under the title.
    pub subtitle: String,
    /// Resolved error notice.
    pub error: Option<String>,
    /// Resolved success notice.
    pub success: Option<String>,
    /// Account panel heading.
    pub account_status_label: String,
    /// `"Status: Premium (5 days left)"` or `"Status: Free account"`.
    pub account_status: String,
    /// Account has premium days left.
    pub premium: bool,
    /// One row per character, in response order.
    pub rows: Vec<CharacterRow>,
    /// Shown instead of rows when the account has no characters.
    pub empty_message: Option<String>,
    /// Back button text.
    pub back_label: String,
    /// Back button accepts clicks.
    pub back_enabled: bool,
    /// Enter button text.
    pub enter_label: String,
    /// Enter button accepts clicks.
    pub enter_enabled: bool,
    /// Show the busy indicator on the enter button.
    pub loading: bool,
}

/// One character in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterRow {
    /// Character name.
    pub name: String,
    /// World name, empty when unknown.
    pub world: String,
    /// `"Level 8"`, or `"Level N/A"`.
    pub level: String,
    /// Vocation, or `"N/A"`.
    pub vocation: String,
    /// Row is the current selection.
    pub selected: bool,
    /// Row does not accept clicks.
    pub disabled: bool,
}

/// Build the screen for the session's current view.
pub fn render<S>(session: &Session<S>, cache: &mut TranslationCache) -> Screen {
    match session.view() {
        View::Login => Screen::Login(login_screen(session, cache)),
        View::Characters => Screen::Characters(character_screen(session, cache)),
    }
}

fn login_screen<S>(session: &Session<S>, cache: &mut TranslationCache) -> LoginScreen {
    let online = session.is_game_online();
    let loading = session.is_loading();

    LoginScreen {
        title: cache.resolve("Login"),
        subtitle: cache.resolve("Enter with your credentials to access the game"),
        error: notice_text(session.error(), cache),
        success: notice_text(session.success(), cache),
        email_label: cache.resolve("Email or Account ID"),
        email_placeholder: cache.resolve("Enter your email or account ID"),
        email: session.email().to_owned(),
        password_label: cache.resolve("Password"),
        password_placeholder: cache.resolve("Enter your password"),
        remember_label: cache.resolve("Remember me"),
        remember: session.remember(),
        inputs_enabled: !loading && !online,
        submit_label: action_label(loading, online, cache),
        submit_enabled: !loading && !online,
        loading,
    }
}

fn character_screen<S>(session: &Session<S>, cache: &mut TranslationCache) -> CharacterScreen {
    let online = session.is_game_online();
    let loading = session.is_loading();
    let days = session.remaining_premium_days();
    let selected = session.selected_character().map(|c| c.name.as_str());

    let status = if days > 0 {
        format!("{} ({days} {} left)", cache.resolve("Premium"), cache.resolve("days"))
    } else {
        cache.resolve("Free account")
    };

    let rows: Vec<CharacterRow> = session
        .characters()
        .iter()
        .map(|c| character_row(c, selected == Some(c.name.as_str()), online, cache))
        .collect();
    let empty_message = rows.is_empty().then(|| cache.resolve("No characters found"));

    CharacterScreen {
        title: cache.resolve("Characters"),
        subtitle: cache.resolve("Select a character to enter the game"),
        error: notice_text(session.error(), cache),
        success: notice_text(session.success(), cache),
        account_status_label: cache.resolve("Account Status"),
        account_status: format!("{}: {status}", cache.resolve("Status")),
        premium: days > 0,
        rows,
        empty_message,
        back_label: cache.resolve("Back"),
        back_enabled: !online,
        enter_label: action_label(loading, online, cache),
        enter_enabled: selected.is_some() && !loading && !online,
        loading,
    }
}

fn character_row(
    character: &Character,
    selected: bool,
    online: bool,
    cache: &mut TranslationCache,
) -> CharacterRow {
    let level = match character.level {
        Some(level) if level > 0 => level.to_string(),
        _ => cache.resolve("N/A"),
    };

    CharacterRow {
        name: character.name.clone(),
        world: character.world_name.clone().unwrap_or_default(),
        level: format!("{} {level}", cache.resolve("Level")),
        vocation: match character.vocation.as_deref() {
            Some(vocation) if !vocation.is_empty() => vocation.to_owned(),
            _ => cache.resolve("N/A"),
        },
        selected,
        disabled: online,
    }
}

fn action_label(loading: bool, online: bool, cache: &mut TranslationCache) -> String {
    if loading {
        cache.resolve("Connecting...")
    } else if online {
        cache.resolve("Login")
    } else {
        cache.resolve("Enter the Game")
    }
}

fn notice_text(notice: Option<Notice>, cache: &mut TranslationCache) -> Option<String> {
    notice.map(|n| cache.resolve(n.translation_key()))
}
