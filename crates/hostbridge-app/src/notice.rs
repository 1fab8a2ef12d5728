//! User-visible messages.

/// Closed set of messages the session can show.
///
/// The session stores the kind only; the view maps it to a translation key and
/// resolves it through the translation cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Email or password left empty.
    FillAllFields,
    /// Authentication service rejected the credentials.
    CredentialsIncorrect,
    /// Authentication request did not complete.
    ConnectionError,
    /// Enter pressed with no character selected.
    SelectCharacter,
    /// The `login_complete` message could not be built.
    GameConnectionError,
}

impl Notice {
    /// Every notice kind.
    pub const ALL: [Self; 5] = [
        Self::FillAllFields,
        Self::CredentialsIncorrect,
        Self::ConnectionError,
        Self::SelectCharacter,
        Self::GameConnectionError,
    ];

    /// Translation key for this notice.
    pub fn translation_key(self) -> &'static str {
        match self {
            Self::FillAllFields => "Please fill in all fields.",
            Self::CredentialsIncorrect => "Email or password incorrect",
            Self::ConnectionError => "Connection error",
            Self::SelectCharacter => "Select a character to enter the game",
            Self::GameConnectionError => "Error connecting to game",
        }
    }
}
