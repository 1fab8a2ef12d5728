//! Messages the UI sends to the host.

use serde_json::Value;

use crate::{Envelope, errors::Result, names, payloads::LoginComplete};

/// Every message the UI may send.
///
/// Each variant maps to exactly one name in [`crate::names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// UI finished loading.
    JsLoaded,

    /// Request one translation.
    Translate {
        /// Key to translate. Doubles as the correlation id of the reply.
        key: String,
    },

    /// Request several translations in one round-trip.
    TranslateMultiple {
        /// Keys to translate. Sent comma-joined, so no key may contain `,`.
        keys: Vec<String>,
    },

    /// Character chosen; the host takes over from here.
    LoginComplete(LoginComplete),
}

impl Outbound {
    /// Wire name of this message.
    pub fn name(&self) -> &'static str {
        match self {
            Self::JsLoaded => names::JS_LOADED,
            Self::Translate { .. } => names::TRANSLATE,
            Self::TranslateMultiple { .. } => names::TRANSLATE_MULTIPLE,
            Self::LoginComplete(_) => names::LOGIN_COMPLETE,
        }
    }

    /// Build the envelope for this message.
    pub fn into_envelope(self) -> Result<Envelope> {
        let name = self.name();
        let data = match self {
            Self::JsLoaded => Value::String(String::new()),
            Self::Translate { key } => Value::String(key),
            Self::TranslateMultiple { keys } => Value::String(keys.join(",")),
            Self::LoginComplete(body) => serde_json::to_value(body)?,
        };
        Envelope::new(name, data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::payloads::{Character, Credentials, LoginMethod};

    #[test]
    fn translate_multiple_joins_keys() {
        let envelope =
            Outbound::TranslateMultiple { keys: vec!["Back".into(), "Level".into()] }
                .into_envelope()
                .expect("envelope");

        assert_eq!(envelope.name, "translate_multiple");
        assert_eq!(envelope.data, json!("Back,Level"));
    }

    #[test]
    fn login_complete_carries_structured_body() {
        let envelope = Outbound::LoginComplete(LoginComplete {
            character: Character::named("Bob"),
            credentials: Credentials { email: "a@x.com".into(), password: "p".into() },
            method: LoginMethod::Traditional,
        })
        .into_envelope()
        .expect("envelope");

        assert_eq!(envelope.name, "login_complete");
        assert_eq!(envelope.data["character"]["name"], "Bob");
        assert_eq!(envelope.data["method"], "traditional");
    }

    #[test]
    fn js_loaded_has_empty_body() {
        let envelope = Outbound::JsLoaded.into_envelope().expect("envelope");
        assert_eq!(envelope.encode().expect("encode"), r#"{"name":"js_loaded","data":""}"#);
    }
}
