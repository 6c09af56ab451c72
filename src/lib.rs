//! # xviz-io
//!
//! Rust implementation of the XVIZ frame-log on-disk format (writer side).
//!
//! XVIZ is an open visualization protocol for autonomous-vehicle data.
//! This library converts timestamped visualization records into a durable,
//! seekable set of frame files plus a companion JSON time index that lets a
//! streaming server locate any frame by timestamp without decoding the log.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (errors, timestamps)
//! - [`core`] - Record value model and canonicalization
//! - [`schema`] - Message kinds, encoder registry, envelope encoding
//! - [`io`] - Sinks, frame naming, the frame writer and time index
//!
//! ## Example
//!
//! ```ignore
//! use xviz_io::prelude::*;
//!
//! let sink = FileSink::new("out/log")?;
//! let mut writer = FrameWriter::new(sink, JsonSchemaRegistry::new());
//!
//! writer.write_metadata(&metadata)?;
//! for (index, record) in records.enumerate() {
//!     writer.write_message(index as u64, &record)?;
//! }
//! writer.close()?;
//! ```

pub mod core;
pub mod io;
pub mod schema;
pub mod util;

// Re-export commonly used types
pub use crate::core::{canonicalize, Mapping, NumericBuffer, Value};
pub use crate::io::{FileSink, FrameWriter, MemorySink, Sink, TimeIndex, WriterOptions};
pub use crate::schema::{JsonSchemaRegistry, MessageKind, SchemaRegistry};
pub use crate::util::{Error, Result, Timestamp};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{canonicalize, Mapping, NumericBuffer, Value};
    pub use crate::io::{
        FileSink, FrameWriter, MemorySink, Sink, TimeIndex, TimingTracker, WriterOptions,
    };
    pub use crate::schema::{
        EnvelopeEncoder, JsonSchemaRegistry, MessageEncoder, MessageKind, SchemaRegistry,
    };
    pub use crate::util::{Error, Result, Timestamp};
}
