use serde_json::Value;

use super::json;
use crate::error::SignatureError;
use crate::signing::hex_sha256;

/// A transaction body as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Text sent as-is by the caller, expected to be JSON.
    Raw(String),
    /// A JSON value serialized here before digesting.
    Structured(Value),
}

impl RequestBody {
    /// JSON strings are raw bodies; every other value is structured.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => RequestBody::Raw(text),
            other => RequestBody::Structured(other),
        }
    }

    /// The minified bytes that get hashed.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, SignatureError> {
        match self {
            RequestBody::Raw(text) if text.is_empty() => Ok(Vec::new()),
            RequestBody::Raw(text) => {
                json::compact(text.as_bytes()).map_err(SignatureError::InvalidJsonBody)
            }
            RequestBody::Structured(value) => {
                let serialized = json::to_html_safe_vec(value)?;
                json::compact(&serialized).map_err(SignatureError::Serialization)
            }
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Raw(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Raw(text.to_owned())
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Structured(value)
    }
}

/// `Lowercase(HexEncode(SHA-256(minify(body))))`, or `""` when there is no
/// body or the raw body is empty.
pub fn body_digest(body: Option<&RequestBody>) -> Result<String, SignatureError> {
    let Some(body) = body else {
        return Ok(String::new());
    };

    let canonical = body.canonical_bytes()?;
    if canonical.is_empty() {
        return Ok(String::new());
    }

    Ok(hex_sha256(&canonical))
}
