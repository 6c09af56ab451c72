//! Schema layer - message kinds, encoder registry, envelope encoding.
//!
//! This module provides:
//! - [`MessageKind`] - The fixed enumerated message types
//! - [`SchemaRegistry`] / [`MessageEncoder`] - Consumed encoder interfaces
//! - [`JsonSchemaRegistry`] - Reference JSON registry implementation
//! - [`EnvelopeEncoder`] - Payload encoding with optional envelope wrapping

mod envelope;
mod kind;
mod registry;

pub use envelope::EnvelopeEncoder;
pub use kind::MessageKind;
pub use registry::{
    value_to_json, JsonMessageEncoder, JsonSchemaRegistry, MessageEncoder, SchemaRegistry,
};
