//! The wrapper every Moku API response comes in:
//!
//! ```text
//! { "success": bool, "data": any, "code": string, "messages": string }
//! ```
//!
//! `code` and `messages` only show up on failure. `data` is whatever the endpoint returns, except that
//! some endpoints hand back nested objects as a JSON string which has to be decoded a second time.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: Payload,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub messages: Option<Messages>,
}

/// Diagnostic text on a failed call. Some firmware sends a single string, some a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Messages {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Messages::One(s) => f.write_str(s),
            Messages::Many(v) => f.write_str(&v.join("; ")),
        }
    }
}

/// The `data` field, classified once when the envelope is decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Missing or null.
    Absent,
    /// Any non-string value, exactly as sent.
    Value(Value),
    /// A string holding a JSON object or array, already decoded.
    Encoded(Value),
    /// A string that is just a string (a device name, a client key).
    Text(String),
}

impl Default for Payload {
    fn default() -> Self { Payload::Absent }
}

impl From<Option<Value>> for Payload {
    fn from(raw: Option<Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Payload::Absent,
            Some(Value::String(s)) => decode_nested(s),
            Some(v) => Payload::Value(v),
        }
    }
}

// Only text that opens like an object or array and actually parses as one is treated as encoded.
fn decode_nested(s: String) -> Payload {
    let trimmed = s.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Payload::Text(s);
    }

    match serde_json::from_str::<Value>(&s) {
        Ok(v @ Value::Object(_)) | Ok(v @ Value::Array(_)) => Payload::Encoded(v),
        _ => Payload::Text(s),
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<Value>::deserialize(deserializer).map(Payload::from)
    }
}

impl Payload {

    pub fn is_absent(&self) -> bool { matches!(self, Payload::Absent) }

    /// The structured value, if there is one. Text and absent payloads give `None`.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Payload::Value(v) | Payload::Encoded(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a top-level field of an object payload.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_value().and_then(|v| v.get(field))
    }

    /// Back to a plain JSON value, the way it would look with the double encoding removed.
    pub fn into_value(self) -> Value {
        match self {
            Payload::Absent => Value::Null,
            Payload::Value(v) | Payload::Encoded(v) => v,
            Payload::Text(s) => Value::String(s),
        }
    }

    /// Deserialize the payload into a caller-chosen type.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let value = self.into_value();
        serde_json::from_value(value).map_err(|e| Error::UnexpectedPayload(e.to_string()))
    }

}

/// What a `success: false` envelope had to say for itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationFailure {
    pub code: Option<String>,
    pub messages: Option<String>,
}

impl fmt::Display for ApplicationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::error::describe(&self.code, &self.messages))
    }
}

impl From<ApplicationFailure> for Error {
    fn from(failure: ApplicationFailure) -> Self {
        Error::Application { code: failure.code, messages: failure.messages }
    }
}

impl Envelope {

    /// Split into the payload and, when `success` is false, the failure diagnostic.
    pub fn into_parts(self) -> (Payload, Option<ApplicationFailure>) {
        let failure = if self.success {
            None
        } else {
            Some(ApplicationFailure {
                code: self.code,
                messages: self.messages.map(|m| m.to_string()),
            })
        };

        (self.data, failure)
    }

}
