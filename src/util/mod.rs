//! Utility types for xviz-io.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - [`Timestamp`] - Time value alias

mod error;

pub use error::*;

/// Timestamp type - time value (seconds).
pub type Timestamp = f64;
