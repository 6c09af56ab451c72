//! Schema registry interface and the reference JSON registry.
//!
//! The real wire schema is an external, versioned contract: per message kind
//! it supplies one opaque encode function. [`SchemaRegistry`] is the consumed
//! interface; [`JsonSchemaRegistry`] is a self-contained reference
//! implementation that renders canonical records as JSON text, with binary
//! blobs carried as standard base64 strings.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::core::{Mapping, Value};
use crate::schema::kind::MessageKind;
use crate::util::{Error, Result};

/// Encoder for one message kind.
pub trait MessageEncoder {
    /// Encode a canonical record into opaque payload bytes.
    ///
    /// Fails with [`Error::Encoding`] when the record violates the kind's
    /// field constraints.
    fn encode(&self, message: &Value) -> Result<Vec<u8>>;
}

/// Lookup of per-kind encoders.
pub trait SchemaRegistry {
    /// Get the encoder for a message kind.
    ///
    /// Fails with [`Error::UnknownMessageKind`] when the registry does not
    /// carry the kind.
    fn encoder(&self, kind: MessageKind) -> Result<&dyn MessageEncoder>;
}

/// JSON encoder bound to one message kind.
pub struct JsonMessageEncoder {
    kind: MessageKind,
}

impl JsonMessageEncoder {
    /// Create an encoder for the given kind.
    pub fn new(kind: MessageKind) -> Self {
        Self { kind }
    }

    /// Structural constraints checked before rendering.
    fn validate<'a>(&self, message: &'a Value) -> Result<&'a Mapping> {
        let map = message.as_mapping().ok_or_else(|| {
            Error::encoding(format!("{} message must be a mapping", self.kind))
        })?;

        let required: &[&str] = match self.kind {
            MessageKind::Envelope => &["type", "data"],
            MessageKind::StateUpdate => &["updates"],
            MessageKind::Metadata => &["version"],
            _ => &[],
        };
        for field in required {
            if !map.contains(field) {
                return Err(Error::encoding(format!(
                    "{} message is missing required field '{}'",
                    self.kind, field
                )));
            }
        }

        Ok(map)
    }
}

impl MessageEncoder for JsonMessageEncoder {
    fn encode(&self, message: &Value) -> Result<Vec<u8>> {
        self.validate(message)?;
        let json = value_to_json(message);
        Ok(serde_json::to_vec(&json)?)
    }
}

/// Reference registry carrying a JSON encoder per message kind.
pub struct JsonSchemaRegistry {
    encoders: [JsonMessageEncoder; MessageKind::COUNT],
}

impl JsonSchemaRegistry {
    /// Create a registry with encoders for every kind.
    pub fn new() -> Self {
        Self {
            encoders: MessageKind::ALL.map(JsonMessageEncoder::new),
        }
    }
}

impl Default for JsonSchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry for JsonSchemaRegistry {
    fn encoder(&self, kind: MessageKind) -> Result<&dyn MessageEncoder> {
        Ok(&self.encoders[kind.index()])
    }
}

/// Render a canonical value as JSON.
///
/// Integral numbers are written without a fractional part; non-finite numbers
/// become `null`; blobs become base64 text.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
        Value::Mapping(map) => {
            let entries = map
                .iter()
                .map(|(k, v)| (k.to_string(), value_to_json(v)))
                .collect();
            serde_json::Value::Object(entries)
        }
        Value::Buffer(buf) => {
            serde_json::Value::Array(buf.to_numbers().iter().map(value_to_json).collect())
        }
        Value::Blob(bytes) => serde_json::Value::String(BASE64.encode(bytes)),
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}
