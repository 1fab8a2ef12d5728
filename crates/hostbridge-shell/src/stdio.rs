//! Stdio driver for the shell.
//!
//! Implements the [`Driver`] trait over stdin lines. Authentication runs on
//! spawned tasks and reports back through a channel, so host messages keep
//! flowing while a login is in flight. Screens are written as JSON lines to
//! a separate writer so stdout stays a clean host wire.

use std::io::{self, Write};

use hostbridge_app::{AuthOutcome, AuthRequest, Driver, DriverEvent, Screen};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::mpsc,
};

use crate::{HttpAuthenticator, ShellError, parse_line};

/// Stdio driver implementing the [`Driver`] trait.
pub struct StdioDriver<R, W> {
    lines: Lines<R>,
    input_open: bool,
    screens: W,
    authenticator: HttpAuthenticator,
    completions_tx: mpsc::UnboundedSender<AuthOutcome>,
    completions_rx: mpsc::UnboundedReceiver<AuthOutcome>,
    in_flight: usize,
}

impl StdioDriver<BufReader<Stdin>, io::Stderr> {
    /// Driver reading stdin and writing screens to stderr.
    pub fn stdio(authenticator: HttpAuthenticator) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), io::stderr(), authenticator)
    }
}

impl<R, W> StdioDriver<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Driver over arbitrary input and screen writers.
    pub fn new(input: R, screens: W, authenticator: HttpAuthenticator) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            lines: input.lines(),
            input_open: true,
            screens,
            authenticator,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    /// Authentication requests still running.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn completed(&mut self, outcome: AuthOutcome) -> Option<DriverEvent> {
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(DriverEvent::AuthCompleted(outcome))
    }

    /// Turn a stdin line into an event. `None` for lines to skip.
    fn line_event(line: &str) -> Option<DriverEvent> {
        match parse_line(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring input line");
                None
            },
        }
    }
}

impl<R, W> Driver for StdioDriver<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    type Error = ShellError;

    async fn poll_event(&mut self) -> Result<Option<DriverEvent>, Self::Error> {
        loop {
            if !self.input_open {
                if self.in_flight == 0 {
                    return Ok(None);
                }
                // The driver holds a sender, so the channel never closes.
                return Ok(match self.completions_rx.recv().await {
                    Some(outcome) => self.completed(outcome),
                    None => None,
                });
            }

            tokio::select! {
                Some(outcome) = self.completions_rx.recv() => {
                    return Ok(self.completed(outcome));
                },
                line = self.lines.next_line() => match line? {
                    Some(line) => {
                        if let Some(event) = Self::line_event(&line) {
                            return Ok(Some(event));
                        }
                    },
                    None => {
                        tracing::debug!("input closed");
                        self.input_open = false;
                    },
                },
            }
        }
    }

    fn authenticate(&mut self, request: AuthRequest) {
        let authenticator = self.authenticator.clone();
        let completions = self.completions_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = authenticator.login(&request).await;
            if completions.send(outcome).is_err() {
                tracing::debug!("driver gone before authentication finished");
            }
        });
    }

    fn render(&mut self, screen: &Screen) -> Result<(), Self::Error> {
        let json = serde_json::to_string(screen)?;
        writeln!(self.screens, "{json}")?;
        self.screens.flush()?;
        Ok(())
    }

    fn stop(&mut self) {
        if self.in_flight > 0 {
            tracing::info!(in_flight = self.in_flight, "stopping with authentication in flight");
        }
    }
}
