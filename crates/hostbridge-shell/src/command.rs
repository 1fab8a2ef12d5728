//! Stdin line parsing.
//!
//! Lines starting with `:` are user commands; everything else is raw host
//! text handed to the bridge unchanged.
//!
//! ```text
//! :email a@x.com
//! :password secret
//! :remember on
//! :submit
//! :select Bob
//! :enter
//! :back
//! :quit
//! {"name":"init_config","data":{}}
//! ```

use hostbridge_app::{DriverEvent, UiInput};
use thiserror::Error;

const COMMAND_PREFIX: char = ':';

/// Why a command line was not understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// No such command.
    #[error("unknown command :{0}")]
    Unknown(String),

    /// The command needs an argument.
    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),

    /// `:remember` takes `on` or `off`.
    #[error("expected on or off, got {0:?}")]
    NotAToggle(String),
}

/// Parse one stdin line.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<DriverEvent>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix(COMMAND_PREFIX) else {
        return Ok(Some(DriverEvent::Host(line.to_owned())));
    };

    let (name, argument) = match command.split_once(' ') {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    let input = match name {
        "email" => UiInput::EmailChanged(argument.to_owned()),
        "password" => UiInput::PasswordChanged(argument.to_owned()),
        "remember" => UiInput::RememberChanged(parse_toggle(argument)?),
        "submit" => UiInput::Submit,
        "select" if argument.is_empty() => return Err(CommandError::MissingArgument("select")),
        "select" => UiInput::SelectCharacter(argument.to_owned()),
        "enter" => UiInput::EnterGame,
        "back" => UiInput::Back,
        "quit" => return Ok(Some(DriverEvent::Quit)),
        other => return Err(CommandError::Unknown(other.to_owned())),
    };
    Ok(Some(DriverEvent::Input(input)))
}

fn parse_toggle(argument: &str) -> Result<bool, CommandError> {
    match argument {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        "" => Err(CommandError::MissingArgument("remember")),
        other => Err(CommandError::NotAToggle(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(line: &str) -> UiInput {
        match parse_line(line) {
            Ok(Some(DriverEvent::Input(input))) => input,
            other => panic!("expected input for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn plain_line_is_host_text() {
        let raw = r#"{"name":"logout"}"#;
        assert!(matches!(parse_line(raw), Ok(Some(DriverEvent::Host(text))) if text == raw));
    }

    #[test]
    fn blank_line_is_skipped() {
        assert!(matches!(parse_line("   \r\n"), Ok(None)));
    }

    #[test]
    fn field_commands_keep_inner_spaces() {
        assert_eq!(input(":select Sir Bob"), UiInput::SelectCharacter("Sir Bob".into()));
        assert_eq!(input(":email a@x.com"), UiInput::EmailChanged("a@x.com".into()));
        assert_eq!(input(":password"), UiInput::PasswordChanged(String::new()));
    }

    #[test]
    fn toggles_and_actions() {
        assert_eq!(input(":remember on"), UiInput::RememberChanged(true));
        assert_eq!(input(":remember off"), UiInput::RememberChanged(false));
        assert_eq!(input(":submit"), UiInput::Submit);
        assert_eq!(input(":enter"), UiInput::EnterGame);
        assert_eq!(input(":back"), UiInput::Back);
        assert!(matches!(parse_line(":quit"), Ok(Some(DriverEvent::Quit))));
    }

    #[test]
    fn bad_commands_are_reported() {
        assert!(matches!(parse_line(":dance"), Err(CommandError::Unknown(name)) if name == "dance"));
        assert!(matches!(parse_line(":remember maybe"), Err(CommandError::NotAToggle(_))));
        assert!(matches!(parse_line(":select"), Err(CommandError::MissingArgument("select"))));
    }
}
