//! Error types for the xviz-io library.

use thiserror::Error;

/// Main error type for frame-writing operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A state update carried no usable timestamps
    #[error("Missing or invalid timestamp: {0}")]
    Timestamp(String),

    /// A data frame was skipped, leaving a hole in the time index.
    /// Bounds are physical frame slots (data frames start at slot 2).
    #[error("Error writing time index file. Messages are missing between {from} and {to}")]
    IndexGap { from: u64, to: u64 },

    /// The schema registry rejected a canonical record
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// A message kind has no encoder in the registry
    #[error("Unknown message kind: {0}")]
    UnknownMessageKind(String),

    /// Write attempted after the session was closed
    #[error("Writer session is closed")]
    WriterClosed,

    /// I/O error from the sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a timestamp error from a string.
    pub fn timestamp(msg: impl Into<String>) -> Self {
        Self::Timestamp(msg.into())
    }

    /// Create an encoding error from a string.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result type alias for xviz-io operations.
pub type Result<T> = std::result::Result<T, Error>;
