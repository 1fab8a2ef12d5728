//! The `{ name, data }` message unit.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::errors::{ProtocolError, Result};

/// Message unit crossing the UI/host boundary.
///
/// # Invariants
///
/// - `name` is non-empty. Enforced by [`Envelope::new`] and
///   [`Envelope::decode`].
/// - `data` is plain JSON (scalars, objects, arrays). There is no way to embed
///   an opaque host handle in a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Message name used for routing.
    pub name: String,
    /// Message body. `Null` when the sender omitted it.
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Create an envelope, rejecting an empty name.
    pub fn new(name: impl Into<String>, data: Value) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ProtocolError::EmptyName);
        }
        Ok(Self { name, data })
    }

    /// Create an envelope whose data is a serialized payload.
    pub fn with_payload<T: Serialize>(name: impl Into<String>, payload: &T) -> Result<Self> {
        Self::new(name, serde_json::to_value(payload)?)
    }

    /// Serialize the whole envelope into the single string handed to the host.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an envelope from its string form.
    pub fn decode(raw: &str) -> Result<Self> {
        let envelope: Self = serde_json::from_str(raw)?;
        if envelope.name.is_empty() {
            return Err(ProtocolError::EmptyName);
        }
        Ok(envelope)
    }

    /// Decode `data` as `T`, see [`decode_data`].
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        decode_data(&self.data)
    }
}

/// Decode a message body that may be structured JSON or a JSON string.
///
/// Hosts deliver some payloads as already-parsed objects and others as the
/// text of a JSON document. A string is parsed first; if that fails the raw
/// string itself is offered to `T`, so plain string bodies (a translation key,
/// a locale tag) still decode.
pub fn decode_data<T: DeserializeOwned>(data: &Value) -> Result<T> {
    if let Value::String(raw) = data {
        return match serde_json::from_str(raw) {
            Ok(value) => Ok(value),
            Err(err) => serde_json::from_value(data.clone()).map_err(|_| ProtocolError::Json(err)),
        };
    }
    Ok(T::deserialize(data)?)
}
