//! Translation replies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body of `translations_result`: translated value per key.
pub type TranslationBatch = HashMap<String, String>;

/// Body of `translation_result`.
///
/// Hosts send either a `[key, value]` pair or a `{ "key", "value" }` object;
/// both decode to the same reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReplyRepr")]
pub struct TranslationReply {
    /// Requested key.
    pub key: String,
    /// Translated value.
    pub value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReplyRepr {
    Pair(String, String),
    Object { key: String, value: String },
}

impl From<ReplyRepr> for TranslationReply {
    fn from(repr: ReplyRepr) -> Self {
        match repr {
            ReplyRepr::Pair(key, value) | ReplyRepr::Object { key, value } => Self { key, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::decode_data;

    #[test]
    fn pair_and_object_forms_agree() {
        let pair: TranslationReply = decode_data(&json!(["Back", "Voltar"])).expect("pair");
        let object: TranslationReply =
            decode_data(&json!({"key": "Back", "value": "Voltar"})).expect("object");

        assert_eq!(pair, object);
        assert_eq!(pair.value, "Voltar");
    }

    #[test]
    fn batch_from_string() {
        let batch: TranslationBatch =
            decode_data(&json!(r#"{"Back":"Voltar","Level":"Nivel"}"#)).expect("batch");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch["Level"], "Nivel");
    }
}
