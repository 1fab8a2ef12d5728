//! Authentication request/response bodies and the `login_complete` message.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Account credentials.
///
/// Serves as both the authentication request body and the `credentials`
/// field of [`LoginComplete`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Email or account id, sent exactly as typed.
    pub email: String,
    /// Password.
    pub password: String,
}

/// A playable character as reported by the authentication service.
///
/// Fields the UI does not read are kept in `extra` so the record can be
/// echoed back to the host unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character name. Characters are identified by name.
    pub name: String,
    /// World the character lives on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_name: Option<String>,
    /// Character level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Character vocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocation: Option<String>,
    /// Remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Character {
    /// Character with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), world_name: None, level: None, vocation: None, extra: Map::new() }
    }
}

/// Successful authentication response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Characters on the account. Empty when absent or `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: Vec<Character>,
    /// Premium days left. Zero when absent or `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub remaining_premium_days: u32,
    /// Opaque session token.
    #[serde(default)]
    pub session_token: Option<String>,
}

/// Services send `null` for fields they have no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// How the user authenticated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    /// Email/password form.
    #[default]
    Traditional,
}

/// Body of the `login_complete` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginComplete {
    /// Selected character, as received from the authentication service.
    pub character: Character,
    /// Credentials used for the login.
    pub credentials: Credentials,
    /// Login method.
    pub method: LoginMethod,
}
