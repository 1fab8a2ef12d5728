//! Remember-me record.
//!
//! Persisted layout (all values are strings):
//!
//! | key | written when |
//! |-----|--------------|
//! | `remember_me` | login succeeded with remember checked (`"true"`) |
//! | `saved_email` | same |
//! | `saved_password` | same |
//! | `session_token` | every successful login |
//!
//! `back` clears the first three and keeps the token. Only an explicit full
//! reset clears the token.

use hostbridge_core::{KeyValueStore, StoreError};
use hostbridge_proto::payloads::Credentials;

/// Remember-me flag key.
pub const REMEMBER_ME_KEY: &str = "remember_me";
/// Saved email key.
pub const SAVED_EMAIL_KEY: &str = "saved_email";
/// Saved password key.
pub const SAVED_PASSWORD_KEY: &str = "saved_password";
/// Session token key.
pub const SESSION_TOKEN_KEY: &str = "session_token";

const REMEMBER_ME_SET: &str = "true";

/// Credentials restored from a remember-me record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberedLogin {
    /// Saved credentials. Both fields are non-empty.
    pub credentials: Credentials,
}

/// Typed access to the remember-me record in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct RememberStore<S> {
    store: S,
}

impl<S: KeyValueStore> RememberStore<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saved credentials, if remember-me is set and both fields are present.
    pub fn load(&self) -> Result<Option<RememberedLogin>, StoreError> {
        if self.store.get(REMEMBER_ME_KEY)?.as_deref() != Some(REMEMBER_ME_SET) {
            return Ok(None);
        }

        let email = self.store.get(SAVED_EMAIL_KEY)?.unwrap_or_default();
        let password = self.store.get(SAVED_PASSWORD_KEY)?.unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Ok(None);
        }

        Ok(Some(RememberedLogin { credentials: Credentials { email, password } }))
    }

    /// Persist a successful login.
    ///
    /// The token is written regardless of `remember`; the credentials only
    /// when `remember` is set.
    pub fn save_login(
        &self,
        credentials: &Credentials,
        remember: bool,
        session_token: Option<&str>,
    ) -> Result<(), StoreError> {
        match session_token {
            Some(token) => self.store.set(SESSION_TOKEN_KEY, token)?,
            None => tracing::warn!("login response carried no session token"),
        }

        if remember {
            self.store.set(REMEMBER_ME_KEY, REMEMBER_ME_SET)?;
            self.store.set(SAVED_EMAIL_KEY, &credentials.email)?;
            self.store.set(SAVED_PASSWORD_KEY, &credentials.password)?;
        }
        Ok(())
    }

    /// Clear the remember-me fields, keeping the session token.
    pub fn forget(&self) -> Result<(), StoreError> {
        self.store.remove(REMEMBER_ME_KEY)?;
        self.store.remove(SAVED_EMAIL_KEY)?;
        self.store.remove(SAVED_PASSWORD_KEY)
    }

    /// Persisted session token.
    pub fn session_token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(SESSION_TOKEN_KEY)
    }

    /// Clear the session token only.
    pub fn clear_session_token(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_TOKEN_KEY)
    }
}
