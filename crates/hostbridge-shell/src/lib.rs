//! Headless shell for the UI/host bridge.
//!
//! Runs the production [`Runtime`] over stdio: the host talks newline-delimited
//! envelopes on stdin/stdout, user commands arrive on stdin prefixed with `:`,
//! rendered screens go to stderr as JSON lines, and authentication requests go
//! over HTTP.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod auth;
mod command;
mod error;
mod host;
mod stdio;

pub use auth::HttpAuthenticator;
pub use command::{CommandError, parse_line};
pub use error::ShellError;
use hostbridge_app::{Bridge, Runtime};
use hostbridge_core::{KeyValueStore, TranslationCache, Transport};
pub use host::LineHost;
pub use stdio::StdioDriver;

/// Run the bridge over stdio until stdin closes or `:quit`.
pub async fn run<S: KeyValueStore>(store: S, cache: TranslationCache) -> Result<(), ShellError> {
    let authenticator = HttpAuthenticator::new()?;
    let driver = StdioDriver::stdio(authenticator);
    let bridge = Bridge::with_cache(Transport::new(LineHost::stdout()), store, cache);

    let mut runtime = Runtime::new(driver, bridge);
    runtime.run().await?;

    let stats = runtime.bridge().transport().stats();
    tracing::info!(sent = stats.sent, failed = stats.failed, dropped = stats.dropped, "shell stopped");
    Ok(())
}
