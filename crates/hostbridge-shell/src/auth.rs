//! HTTP authentication client.

use hostbridge_app::{AuthFailure, AuthOutcome, AuthRequest};
use hostbridge_proto::payloads::AuthResponse;

use crate::ShellError;

/// Performs `POST {url}` with the credentials as JSON body.
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: reqwest::Client,
}

impl HttpAuthenticator {
    /// Build the HTTP client.
    pub fn new() -> Result<Self, ShellError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Run one authentication request.
    ///
    /// A non-success status is [`AuthFailure::Rejected`]; connection errors,
    /// timeouts and unreadable bodies are [`AuthFailure::Transport`].
    pub async fn login(&self, request: &AuthRequest) -> AuthOutcome {
        let response = self
            .client
            .post(&request.url)
            .timeout(request.timeout)
            .json(&request.credentials)
            .send()
            .await
            .map_err(|e| AuthFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthFailure::Rejected { status: status.as_u16() });
        }

        response.json::<AuthResponse>().await.map_err(|e| AuthFailure::Transport(e.to_string()))
    }
}
