//! The uniform `{code, message, data}` response wrapper.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application codes that denote success.
pub const SUCCESS_CODES: [i64; 2] = [200, 0];

/// Parsed view of a backend envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Reads the envelope fields out of a JSON body.
    ///
    /// Returns `None` unless the body is an object carrying a numeric `code`,
    /// which is how the backend marks an envelope.
    pub fn from_value(body: &Value) -> Option<Self> {
        let object = body.as_object()?;
        let code = object.get("code")?.as_i64()?;
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(Self {
            code: Some(code),
            message,
            data: object.get("data").cloned(),
        })
    }

    pub fn is_success(&self) -> bool {
        match self.code {
            Some(code) => SUCCESS_CODES.contains(&code),
            None => true,
        }
    }

    /// Non-empty message, if the backend sent one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Extracts the business payload from a successful body.
///
/// An explicit `data` key wins, even when it is `null`. An envelope without
/// `data` is returned whole, and so is any body that is not an envelope.
pub fn unwrap_payload(body: Value) -> Value {
    match body {
        Value::Object(mut object) if object.contains_key("data") => {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
