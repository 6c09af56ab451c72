//! I/O layer - sinks, frame format, and the frame writer.
//!
//! This module provides:
//! - [`Sink`] / [`FileSink`] / [`MemorySink`] - Durable named-blob storage
//! - [`frame`] - Frame magic and the naming convention
//! - [`SinkSession`] - Open/closed session capability
//! - [`TimingTracker`] / [`TimeIndex`] - Time index accumulation
//! - [`FrameWriter`] - The frame-log writer

pub mod frame;
mod session;
mod sink;
mod timing;
mod writer;

pub use session::SinkSession;
pub use sink::{FileSink, MemorySink, Sink};
pub use timing::{TimeIndex, TimingEntry, TimingTracker};
pub use writer::{FrameWriter, WriterOptions};
