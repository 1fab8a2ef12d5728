//! Host configuration delivered by `init_config`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default authentication service base url.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/auth";

/// Default login endpoint path, appended to the api url.
pub const DEFAULT_LOGIN_ENDPOINT: &str = "/login";

/// Default authentication timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration supplied by the host at init.
///
/// Every field is optional on the wire and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Base url of the authentication service.
    pub api_url: String,
    /// Endpoint paths relative to `api_url`.
    pub endpoints: Endpoints,
    /// Request timeout in milliseconds.
    pub timeout: u64,
}

impl ClientConfig {
    /// Full url of the login endpoint.
    pub fn login_url(&self) -> String {
        format!("{}{}", self.api_url, self.endpoints.login)
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Endpoint paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Login endpoint path.
    pub login: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self { login: DEFAULT_LOGIN_ENDPOINT.to_owned() }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode_data;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ClientConfig =
            decode_data(&json!({"apiUrl": "https://auth.example"})).expect("decode");

        assert_eq!(config.login_url(), "https://auth.example/login");
        assert_eq!(config.timeout(), Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn stringified_config_decodes() {
        let raw = json!(r#"{"apiUrl":"http://h","endpoints":{"login":"/in"},"timeout":250}"#);
        let config: ClientConfig = decode_data(&raw).expect("decode");

        assert_eq!(config.login_url(), "http://h/in");
        assert_eq!(config.timeout(), Duration::from_millis(250));
    }
}
