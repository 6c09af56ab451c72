//! Writer session state.

use crate::io::sink::Sink;
use crate::util::{Error, Result};

/// Open/closed gate in front of a sink.
///
/// A session starts open, accepts named writes, and closes exactly once;
/// closing is idempotent and every write attempted afterwards fails with
/// [`Error::WriterClosed`]. Writers compose this capability instead of
/// sharing a base type.
pub struct SinkSession<S: Sink> {
    sink: S,
    open: bool,
}

impl<S: Sink> SinkSession<S> {
    /// Create an open session over a sink.
    pub fn new(sink: S) -> Self {
        Self { sink, open: true }
    }

    /// Whether the session still accepts writes.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Fail if the session is closed.
    pub fn validate_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(Error::WriterClosed)
        }
    }

    /// Write a named blob through to the sink.
    pub fn write_to_sink(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.validate_open()?;
        self.sink.write(name, data)
    }

    /// Close the session. Safe to call more than once.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Access the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
