//! Envelope encoding.
//!
//! A frame payload is either the encoded message itself or, by default, a
//! self-describing envelope: the message bytes tagged with the kind's short
//! tag and qualified type URL, encoded once more as the `Envelope` kind.

use crate::core::{Mapping, Value};
use crate::schema::kind::MessageKind;
use crate::schema::registry::SchemaRegistry;
use crate::util::Result;

/// Encodes canonical records into frame payload bytes.
pub struct EnvelopeEncoder<R: SchemaRegistry> {
    registry: R,
    envelope: bool,
}

impl<R: SchemaRegistry> EnvelopeEncoder<R> {
    /// Create an encoder that wraps every message in an envelope.
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            envelope: true,
        }
    }

    /// Create an encoder with explicit envelope behavior.
    pub fn with_envelope(registry: R, envelope: bool) -> Self {
        Self { registry, envelope }
    }

    /// Whether payloads are envelope-wrapped.
    #[inline]
    pub fn envelope(&self) -> bool {
        self.envelope
    }

    /// Encode one canonical record of the given kind.
    pub fn encode(&self, kind: MessageKind, message: &Value) -> Result<Vec<u8>> {
        let bytes = self.registry.encoder(kind)?.encode(message)?;
        if !self.envelope {
            return Ok(bytes);
        }

        let mut data = Mapping::new();
        data.set("type_url", kind.type_url());
        data.set("value", Value::Blob(bytes));

        let mut wrapper = Mapping::new();
        wrapper.set("type", kind.tag());
        wrapper.set("data", data);

        self.registry
            .encoder(MessageKind::Envelope)?
            .encode(&Value::Mapping(wrapper))
    }
}
