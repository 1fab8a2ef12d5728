//! Fuzz target for the login session state machine
//!
//! # Strategy
//!
//! Interleave host messages, user input and authentication completions in
//! arbitrary order, including completions nobody asked for and input that
//! does not belong to the current view.
//!
//! # Invariants
//!
//! - A selected character is always one of the loaded characters
//! - The login view never carries a selection
//! - The characters view is never entered while loading
//! - No key is both pending and resolved
//! - The character list belongs to the credentials last sent for authentication

#![no_main]

use arbitrary::Arbitrary;
use hostbridge_app::{AuthFailure, Bridge, SessionAction, SessionEvent, UiInput, View};
use hostbridge_core::{MemoryStore, Transport};
use hostbridge_harness::{InvariantRegistry, RecordingHost, SessionSnapshot};
use hostbridge_proto::payloads::{AuthResponse, Character, Credentials};
use libfuzzer_sys::fuzz_target;
use serde_json::json;

const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", ""];

#[derive(Debug, Clone, Arbitrary)]
enum Step {
    Config { with_login_endpoint: bool },
    ShowLogin,
    GameState { online: bool },
    Logout,
    Email(String),
    Password(String),
    Remember(bool),
    Submit,
    Select { name_idx: u8 },
    EnterGame,
    Back,
    AuthOk { characters: u8, premium_days: u32, token: bool },
    AuthRejected { status: u16 },
    AuthTransport,
    TranslationReply { key_idx: u8, value: String },
}

fn name(idx: u8) -> &'static str {
    NAMES[idx as usize % NAMES.len()]
}

fn response(characters: u8, premium_days: u32, token: bool) -> AuthResponse {
    AuthResponse {
        characters: (0..characters % 5).map(|i| Character::named(name(i))).collect(),
        remaining_premium_days: premium_days,
        session_token: token.then(|| "token".to_owned()),
    }
}

fuzz_target!(|steps: Vec<Step>| {
    let host = RecordingHost::new();
    let mut bridge = Bridge::new(Transport::new(host), MemoryStore::new());
    let invariants = InvariantRegistry::standard();
    let mut authenticated: Option<Credentials> = None;
    bridge.start();

    for step in steps.into_iter().take(128) {
        let context = format!("{step:?}");
        match step {
            Step::Config { with_login_endpoint } => {
                let endpoints = if with_login_endpoint { json!({ "login": "/auth/login" }) } else { json!({}) };
                let raw = json!({
                    "name": "init_config",
                    "data": { "apiUrl": "http://localhost", "endpoints": endpoints, "timeout": 1000 },
                });
                let _ = bridge.deliver_raw(&raw.to_string());
            },
            Step::ShowLogin => bridge.handle_event(SessionEvent::ShowLogin),
            Step::GameState { online } => bridge.handle_event(SessionEvent::GameStateChanged { is_online: online }),
            Step::Logout => {
                let _ = bridge.deliver_raw(r#"{"name":"logout","data":""}"#);
            },
            Step::Email(email) => bridge.handle_event(UiInput::EmailChanged(email)),
            Step::Password(password) => bridge.handle_event(UiInput::PasswordChanged(password)),
            Step::Remember(on) => bridge.handle_event(UiInput::RememberChanged(on)),
            Step::Submit => bridge.handle_event(UiInput::Submit),
            Step::Select { name_idx } => bridge.handle_event(UiInput::SelectCharacter(name(name_idx).to_owned())),
            Step::EnterGame => bridge.handle_event(UiInput::EnterGame),
            Step::Back => bridge.handle_event(UiInput::Back),
            Step::AuthOk { characters, premium_days, token } => {
                bridge.handle_event(SessionEvent::AuthCompleted(Ok(response(characters, premium_days, token))));
            },
            Step::AuthRejected { status } => {
                bridge.handle_event(SessionEvent::AuthCompleted(Err(AuthFailure::Rejected { status })));
            },
            Step::AuthTransport => {
                bridge.handle_event(SessionEvent::AuthCompleted(Err(AuthFailure::Transport("reset".into()))));
            },
            Step::TranslationReply { key_idx, value } => {
                let keys = hostbridge_app::LOGIN_VIEW_KEYS;
                let key = keys[key_idx as usize % keys.len()];
                let raw = json!({ "name": "translation_result", "data": { "key": key, "value": value } });
                let _ = bridge.deliver_raw(&raw.to_string());
            },
        }

        for action in bridge.take_actions() {
            if let SessionAction::Authenticate(request) = action {
                authenticated = Some(request.credentials);
            }
        }
        let _ = bridge.screen();

        if bridge.session().view() == View::Characters {
            let session = bridge.session();
            let current = Credentials { email: session.email().to_owned(), password: session.password().to_owned() };
            assert_eq!(Some(&current), authenticated.as_ref(), "{context}");
        }
        invariants.assert_all(&SessionSnapshot::from_bridge(&bridge), &context);
    }
});
