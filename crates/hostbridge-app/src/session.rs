//! Login → character-selection state machine.
//!
//! [`Session`] consumes [`SessionEvent`] inputs and produces [`SessionAction`]
//! instructions. It performs no I/O apart from the remember-me record, which
//! is a synchronous key-value store.
//!
//! # Transitions
//!
//! - `ConfigReceived` / `ShowLogin`: return to the login view, then restore
//!   the remember-me record and either start an authentication directly or
//!   show the form.
//! - `Submit`: validate and start an authentication.
//! - `AuthCompleted`: move to the character list, or back to the form with a
//!   notice.
//! - `SelectCharacter`, `EnterGame`, `Back`: character list actions.
//! - `GameStateChanged`: record whether the host runs a game session.
//!
//! While the host reports a running game session every user transition is a
//! no-op. Form edits and `Submit` apply on the login view only, the list
//! actions on the character view only. While an authentication is in flight
//! form edits and `Submit` are no-ops, a host reset keeps the credentials
//! being authenticated, and completions that arrive while nothing is in
//! flight are dropped.

use hostbridge_core::KeyValueStore;
use hostbridge_proto::{
    Outbound,
    payloads::{AuthResponse, Character, ClientConfig, Credentials, LoginComplete, LoginMethod},
};

use crate::{
    AuthFailure, AuthOutcome, AuthRequest, Notice, RememberStore, SessionAction, SessionEvent,
    UiInput,
};

/// Which screen is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    /// Credentials form.
    #[default]
    Login,
    /// Character list of an authenticated account.
    Characters,
}

/// Session state machine.
#[derive(Debug, Clone)]
pub struct Session<S> {
    remember_store: RememberStore<S>,
    config: ClientConfig,
    view: View,
    email: String,
    password: String,
    remember: bool,
    /// An authentication or `login_complete` send is in progress.
    loading: bool,
    error: Option<Notice>,
    success: Option<Notice>,
    characters: Vec<Character>,
    /// Name of the selected character. Always names an entry in `characters`.
    selected: Option<String>,
    remaining_premium_days: u32,
    is_game_online: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Fresh session on the login view with default configuration.
    pub fn new(store: S) -> Self {
        Self {
            remember_store: RememberStore::new(store),
            config: ClientConfig::default(),
            view: View::Login,
            email: String::new(),
            password: String::new(),
            remember: false,
            loading: false,
            error: None,
            success: None,
            characters: Vec::new(),
            selected: None,
            remaining_premium_days: 0,
            is_game_online: false,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionAction> {
        match event {
            SessionEvent::Input(input) => self.handle_input(input),
            SessionEvent::ConfigReceived(config) => {
                self.config = config;
                tracing::debug!(url = %self.config.login_url(), "configuration received");
                self.selected = None;
                self.view = View::Login;
                if let Some(actions) = self.restore_remembered() {
                    return actions;
                }
                vec![SessionAction::Render]
            },
            SessionEvent::ShowLogin => {
                self.selected = None;
                self.error = None;
                self.success = None;
                self.view = View::Login;
                if let Some(actions) = self.restore_remembered() {
                    return actions;
                }
                if self.loading {
                    tracing::debug!("keeping credentials of the login in flight");
                    return vec![SessionAction::Render];
                }
                self.clear_credentials();
                vec![SessionAction::Render]
            },
            SessionEvent::GameStateChanged { is_online } => {
                let was_online = self.is_game_online;
                self.is_game_online = is_online;
                if was_online && !is_online {
                    self.error = None;
                    self.success = None;
                }
                vec![SessionAction::Render]
            },
            SessionEvent::AuthCompleted(outcome) => self.complete_login(outcome),
        }
    }

    fn handle_input(&mut self, input: UiInput) -> Vec<SessionAction> {
        if self.is_game_online {
            tracing::debug!(?input, "input ignored while game is online");
            return vec![];
        }

        let on_form = self.view == View::Login;
        match input {
            UiInput::EmailChanged(_)
            | UiInput::PasswordChanged(_)
            | UiInput::RememberChanged(_)
            | UiInput::Submit
                if !on_form =>
            {
                vec![]
            },
            UiInput::EmailChanged(_) | UiInput::PasswordChanged(_) | UiInput::RememberChanged(_)
                if self.loading =>
            {
                tracing::debug!("form edit ignored while a request is in flight");
                vec![]
            },
            UiInput::EmailChanged(email) => {
                self.email = email;
                vec![SessionAction::Render]
            },
            UiInput::PasswordChanged(password) => {
                self.password = password;
                vec![SessionAction::Render]
            },
            UiInput::RememberChanged(remember) => {
                self.remember = remember;
                vec![SessionAction::Render]
            },
            UiInput::Submit => self.submit(),
            UiInput::SelectCharacter(name) => self.select_character(&name),
            UiInput::EnterGame => self.enter_game(),
            UiInput::Back => self.back(),
        }
    }

    fn submit(&mut self) -> Vec<SessionAction> {
        if self.loading {
            tracing::debug!("submit ignored while a request is in flight");
            return vec![];
        }

        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some(Notice::FillAllFields);
            return vec![SessionAction::Render];
        }

        let request = self.begin_login();
        vec![SessionAction::Render, SessionAction::Authenticate(request)]
    }

    /// Fill credentials from the remember-me record and start authenticating.
    ///
    /// Returns `None` when nothing is remembered, the record is unreadable, or
    /// the login cannot start right now.
    fn restore_remembered(&mut self) -> Option<Vec<SessionAction>> {
        let remembered = match self.remember_store.load() {
            Ok(remembered) => remembered?,
            Err(e) => {
                tracing::error!(error = %e, "failed to read remember-me record");
                return None;
            },
        };

        if self.is_game_online || self.loading {
            tracing::debug!("remembered login skipped");
            return None;
        }

        self.email = remembered.credentials.email;
        self.password = remembered.credentials.password;
        self.remember = true;

        let request = self.begin_login();
        Some(vec![SessionAction::Authenticate(request)])
    }

    fn begin_login(&mut self) -> AuthRequest {
        self.loading = true;
        self.error = None;
        self.success = None;
        AuthRequest {
            url: self.config.login_url(),
            credentials: self.credentials(),
            timeout: self.config.timeout(),
        }
    }

    fn complete_login(&mut self, outcome: AuthOutcome) -> Vec<SessionAction> {
        if !self.loading {
            tracing::warn!("dropping authentication result with no request in flight");
            return vec![];
        }

        match outcome {
            Ok(response) => self.accept_login(response),
            Err(AuthFailure::Rejected { status }) => {
                tracing::info!(status, "authentication rejected");
                self.error = Some(Notice::CredentialsIncorrect);
            },
            Err(AuthFailure::Transport(reason)) => {
                tracing::warn!(%reason, "authentication request failed");
                self.error = Some(Notice::ConnectionError);
            },
        }

        self.loading = false;
        vec![SessionAction::Render]
    }

    fn accept_login(&mut self, response: AuthResponse) {
        let AuthResponse { characters, remaining_premium_days, session_token } = response;
        self.characters = characters;
        self.remaining_premium_days = remaining_premium_days;
        self.selected = None;
        self.view = View::Characters;

        let credentials = self.credentials();
        if let Err(e) =
            self.remember_store.save_login(&credentials, self.remember, session_token.as_deref())
        {
            tracing::error!(error = %e, "failed to persist login");
        }
    }

    fn select_character(&mut self, name: &str) -> Vec<SessionAction> {
        if self.view != View::Characters {
            return vec![];
        }
        if !self.characters.iter().any(|c| c.name == name) {
            tracing::debug!(name, "selected character is not in the list");
            return vec![];
        }

        self.selected = Some(name.to_owned());
        vec![SessionAction::Render]
    }

    fn enter_game(&mut self) -> Vec<SessionAction> {
        if self.view != View::Characters || self.loading {
            return vec![];
        }

        let Some(character) = self.selected_character().cloned() else {
            self.error = Some(Notice::SelectCharacter);
            return vec![SessionAction::Render];
        };

        self.loading = true;
        let message = Outbound::LoginComplete(LoginComplete {
            character,
            credentials: self.credentials(),
            method: LoginMethod::Traditional,
        });

        let mut actions = Vec::with_capacity(2);
        match message.into_envelope() {
            Ok(envelope) => actions.push(SessionAction::Send(envelope)),
            Err(e) => {
                tracing::error!(error = %e, "failed to build login_complete");
                self.error = Some(Notice::GameConnectionError);
            },
        }

        self.loading = false;
        actions.push(SessionAction::Render);
        actions
    }

    fn back(&mut self) -> Vec<SessionAction> {
        if self.view != View::Characters {
            return vec![];
        }

        if let Err(e) = self.remember_store.forget() {
            tracing::error!(error = %e, "failed to clear remember-me record");
        }

        self.clear_credentials();
        self.loading = false;
        self.error = None;
        self.success = None;
        self.characters.clear();
        self.selected = None;
        self.remaining_premium_days = 0;
        self.view = View::Login;
        vec![SessionAction::Render]
    }

    /// Clear the persisted session token.
    ///
    /// Full reset only; `back` keeps the token.
    pub fn clear_session_token(&mut self) {
        if let Err(e) = self.remember_store.clear_session_token() {
            tracing::error!(error = %e, "failed to clear session token");
        }
    }

    /// Remember-me record backing this session.
    pub fn remember_store(&self) -> &RememberStore<S> {
        &self.remember_store
    }
}

impl<S> Session<S> {
    fn clear_credentials(&mut self) {
        self.email.clear();
        self.password.clear();
        self.remember = false;
    }

    fn credentials(&self) -> Credentials {
        Credentials { email: self.email.clone(), password: self.password.clone() }
    }

    /// Show a success notice until the next transition clears it.
    pub fn set_success(&mut self, notice: Notice) {
        self.success = Some(notice);
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current screen.
    pub fn view(&self) -> View {
        self.view
    }

    /// Email as typed.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Remember-me checkbox state.
    pub fn remember(&self) -> bool {
        self.remember
    }

    /// A request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current error notice.
    pub fn error(&self) -> Option<Notice> {
        self.error
    }

    /// Current success notice.
    pub fn success(&self) -> Option<Notice> {
        self.success
    }

    /// Characters from the last successful login.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Selected character. `None` if nothing is selected.
    pub fn selected_character(&self) -> Option<&Character> {
        let name = self.selected.as_deref()?;
        self.characters.iter().find(|c| c.name == name)
    }

    /// Name of the selected character.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Premium days left on the account.
    pub fn remaining_premium_days(&self) -> u32 {
        self.remaining_premium_days
    }

    /// The host runs a game session.
    pub fn is_game_online(&self) -> bool {
        self.is_game_online
    }
}

#[cfg(test)]
mod tests {
    use hostbridge_core::MemoryStore;

    use super::*;
    use crate::{REMEMBER_ME_KEY, SAVED_EMAIL_KEY, SAVED_PASSWORD_KEY, SESSION_TOKEN_KEY};

    fn session() -> Session<MemoryStore> {
        Session::new(MemoryStore::new())
    }

    fn bob_response() -> AuthResponse {
        AuthResponse {
            characters: vec![Character::named("Bob"), Character::named("Alice")],
            remaining_premium_days: 5,
            session_token: Some("tok".into()),
        }
    }

    fn fill(session: &mut Session<MemoryStore>, email: &str, password: &str) {
        session.handle(UiInput::EmailChanged(email.into()).into());
        session.handle(UiInput::PasswordChanged(password.into()).into());
    }

    fn logged_in() -> Session<MemoryStore> {
        let mut session = session();
        fill(&mut session, "a@x.com", "p");
        session.handle(UiInput::Submit.into());
        session.handle(SessionEvent::AuthCompleted(Ok(bob_response())));
        session
    }

    fn auth_requests(actions: &[SessionAction]) -> Vec<&AuthRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                SessionAction::Authenticate(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn new_session_starts_on_login() {
        let session = session();
        assert_eq!(session.view(), View::Login);
        assert!(!session.is_loading());
        assert!(session.characters().is_empty());
    }

    #[test]
    fn submit_with_blank_email_sets_notice() {
        let mut session = session();
        fill(&mut session, "   ", "p");

        let actions = session.handle(UiInput::Submit.into());

        assert_eq!(actions, vec![SessionAction::Render]);
        assert_eq!(session.error(), Some(Notice::FillAllFields));
        assert!(!session.is_loading());
    }

    #[test]
    fn submit_emits_request_for_configured_endpoint() {
        let mut session = session();
        let mut config = ClientConfig::default();
        config.api_url = "http://auth.test".into();
        session.handle(SessionEvent::ConfigReceived(config));
        fill(&mut session, "a@x.com", "p");

        let actions = session.handle(UiInput::Submit.into());

        let requests = auth_requests(&actions);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://auth.test/login");
        assert_eq!(requests[0].credentials.email, "a@x.com");
        assert!(session.is_loading());
    }

    #[test]
    fn second_submit_while_loading_is_ignored() {
        let mut session = session();
        fill(&mut session, "a@x.com", "p");
        session.handle(UiInput::Submit.into());

        let actions = session.handle(UiInput::Submit.into());

        assert!(actions.is_empty());
    }

    #[test]
    fn rejected_login_stays_on_form() {
        let mut session = session();
        fill(&mut session, "a@x.com", "bad");
        session.handle(UiInput::Submit.into());

        session.handle(SessionEvent::AuthCompleted(Err(AuthFailure::Rejected { status: 401 })));

        assert_eq!(session.view(), View::Login);
        assert_eq!(session.error(), Some(Notice::CredentialsIncorrect));
        assert!(!session.is_loading());
    }

    #[test]
    fn transport_failure_sets_connection_error() {
        let mut session = session();
        fill(&mut session, "a@x.com", "p");
        session.handle(UiInput::Submit.into());

        session.handle(SessionEvent::AuthCompleted(Err(AuthFailure::Transport("refused".into()))));

        assert_eq!(session.error(), Some(Notice::ConnectionError));
        assert!(!session.is_loading());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut session = session();

        let actions = session.handle(SessionEvent::AuthCompleted(Ok(bob_response())));

        assert!(actions.is_empty());
        assert_eq!(session.view(), View::Login);
    }

    #[test]
    fn successful_login_shows_characters_without_selection() {
        let session = logged_in();

        assert_eq!(session.view(), View::Characters);
        assert_eq!(session.remaining_premium_days(), 5);
        assert_eq!(session.characters().len(), 2);
        assert!(session.selected_character().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn unchecked_remember_persists_token_only() {
        let session = logged_in();
        let store = session.remember_store().store();

        assert_eq!(store.get(SESSION_TOKEN_KEY).expect("get").as_deref(), Some("tok"));
        assert_eq!(store.get(REMEMBER_ME_KEY).expect("get"), None);
        assert_eq!(store.get(SAVED_EMAIL_KEY).expect("get"), None);
    }

    #[test]
    fn select_requires_known_name() {
        let mut session = logged_in();

        assert!(session.handle(UiInput::SelectCharacter("Zed".into()).into()).is_empty());
        assert!(session.selected_character().is_none());

        session.handle(UiInput::SelectCharacter("Alice".into()).into());
        assert_eq!(session.selected_character().map(|c| c.name.as_str()), Some("Alice"));
    }

    #[test]
    fn select_on_login_view_is_ignored() {
        let mut session = session();
        assert!(session.handle(UiInput::SelectCharacter("Bob".into()).into()).is_empty());
    }

    #[test]
    fn enter_game_without_selection_sets_notice() {
        let mut session = logged_in();

        let actions = session.handle(UiInput::EnterGame.into());

        assert_eq!(actions, vec![SessionAction::Render]);
        assert_eq!(session.error(), Some(Notice::SelectCharacter));
    }

    #[test]
    fn enter_game_sends_login_complete() {
        let mut session = logged_in();
        session.handle(UiInput::SelectCharacter("Bob".into()).into());

        let actions = session.handle(UiInput::EnterGame.into());

        let envelope = match &actions[0] {
            SessionAction::Send(envelope) => envelope,
            other => panic!("expected send, got {other:?}"),
        };
        assert_eq!(envelope.name, "login_complete");
        let body: LoginComplete = envelope.data_as().expect("login_complete body");
        assert_eq!(body.character.name, "Bob");
        assert_eq!(body.credentials.password, "p");
        assert!(!session.is_loading());
    }

    #[test]
    fn back_resets_to_blank_login() {
        let mut session = logged_in();
        session.handle(UiInput::SelectCharacter("Bob".into()).into());

        session.handle(UiInput::Back.into());

        assert_eq!(session.view(), View::Login);
        assert!(session.email().is_empty());
        assert!(session.characters().is_empty());
        assert!(session.selected_character().is_none());
        assert_eq!(session.remaining_premium_days(), 0);
    }

    #[test]
    fn input_is_ignored_while_online() {
        let mut session = logged_in();
        session.handle(SessionEvent::GameStateChanged { is_online: true });

        assert!(session.handle(UiInput::SelectCharacter("Bob".into()).into()).is_empty());
        assert!(session.handle(UiInput::Back.into()).is_empty());
        assert_eq!(session.view(), View::Characters);
    }

    #[test]
    fn going_offline_clears_notices() {
        let mut session = session();
        session.handle(UiInput::Submit.into());
        session.set_success(Notice::ConnectionError);

        session.handle(SessionEvent::GameStateChanged { is_online: true });
        assert_eq!(session.error(), Some(Notice::FillAllFields));

        session.handle(SessionEvent::GameStateChanged { is_online: false });
        assert_eq!(session.error(), None);
        assert_eq!(session.success(), None);
    }

    #[test]
    fn show_login_without_record_clears_form() {
        let mut session = logged_in();

        let actions = session.handle(SessionEvent::ShowLogin);

        assert_eq!(actions, vec![SessionAction::Render]);
        assert_eq!(session.view(), View::Login);
        assert!(session.email().is_empty());
        assert!(!session.remember());
    }

    #[test]
    fn show_login_with_record_logs_in_again() {
        let store = MemoryStore::with_entries([
            (REMEMBER_ME_KEY, "true"),
            (SAVED_EMAIL_KEY, "a@x.com"),
            (SAVED_PASSWORD_KEY, "p"),
        ]);
        let mut session = Session::new(store);

        let actions = session.handle(SessionEvent::ShowLogin);

        assert_eq!(auth_requests(&actions).len(), 1);
        assert!(!actions.contains(&SessionAction::Render));
        assert!(session.remember());
    }

    #[test]
    fn config_after_login_returns_to_form() {
        let mut session = logged_in();
        session.handle(UiInput::SelectCharacter("Bob".into()).into());

        let actions = session.handle(SessionEvent::ConfigReceived(ClientConfig::default()));

        assert_eq!(actions, vec![SessionAction::Render]);
        assert_eq!(session.view(), View::Login);
        assert_eq!(session.selected_name(), None);
    }

    #[test]
    fn form_edits_ignored_while_authenticating() {
        let mut session = session();
        fill(&mut session, "a@x.com", "p");
        session.handle(UiInput::Submit.into());

        let actions = session.handle(UiInput::EmailChanged("b@x.com".into()).into());

        assert!(actions.is_empty());
        assert_eq!(session.email(), "a@x.com");
    }
}
