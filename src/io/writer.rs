//! The frame writer.
//!
//! Converts a sequence of visualization records into the on-disk frame log:
//! metadata once, then data frames in increasing index order, then close.
//! Closing finalizes the companion time index if it was not written yet, so
//! an interrupted session (a signal handler calling [`FrameWriter::close`])
//! still leaves a valid, possibly truncated, index behind.

use tracing::debug;

use crate::core::{canonicalize, Value};
use crate::io::frame::{frame_bytes, message_file_name, INDEX_FILE_NAME, METADATA_FILE_NAME};
use crate::io::session::SinkSession;
use crate::io::sink::Sink;
use crate::io::timing::TimingTracker;
use crate::schema::{EnvelopeEncoder, MessageKind, SchemaRegistry};
use crate::util::Result;

/// Frame writer configuration.
#[derive(Clone, Copy, Debug)]
pub struct WriterOptions {
    /// Wrap each payload in a self-describing envelope. On by default.
    pub envelope: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { envelope: true }
    }
}

/// Writes one frame file per record plus the companion time index.
///
/// Single-writer, strictly sequential: `write_metadata` at most once, then
/// `write_message` per index in increasing order, then `close`.
pub struct FrameWriter<S: Sink, R: SchemaRegistry> {
    session: SinkSession<S>,
    encoder: EnvelopeEncoder<R>,
    timings: TimingTracker,
    index_written: bool,
}

impl<S: Sink, R: SchemaRegistry> FrameWriter<S, R> {
    /// Create a writer with default options.
    pub fn new(sink: S, registry: R) -> Self {
        Self::with_options(sink, registry, WriterOptions::default())
    }

    /// Create a writer with explicit options.
    pub fn with_options(sink: S, registry: R, options: WriterOptions) -> Self {
        Self {
            session: SinkSession::new(sink),
            encoder: EnvelopeEncoder::with_envelope(registry, options.envelope),
            timings: TimingTracker::new(),
            index_written: false,
        }
    }

    /// Whether the session still accepts writes.
    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    /// Write the metadata frame (`1-frame.pbe`).
    ///
    /// Log-level time bounds are recorded for the index before encoding.
    pub fn write_metadata(&mut self, record: &Value) -> Result<()> {
        self.session.validate_open()?;
        self.timings.record_metadata(record);

        let canonical = canonicalize(record);
        let payload = self.encoder.encode(MessageKind::Metadata, &canonical)?;
        let frame = frame_bytes(&payload);

        debug!(bytes = frame.len(), "writing metadata frame");
        self.session.write_to_sink(METADATA_FILE_NAME, &frame)
    }

    /// Write the data frame for a message index (`(index+2)-frame.pbe`).
    ///
    /// Timestamp bounds are recorded before encoding; a record without
    /// usable timestamps fails and writes nothing.
    pub fn write_message(&mut self, index: u64, record: &Value) -> Result<()> {
        self.session.validate_open()?;
        self.timings.record_message(index, record)?;

        let canonical = canonicalize(record);
        let payload = self.encoder.encode(MessageKind::StateUpdate, &canonical)?;
        let frame = frame_bytes(&payload);

        debug!(index, bytes = frame.len(), "writing state update frame");
        self.session.write_to_sink(&message_file_name(index), &frame)
    }

    /// Finalize and persist the time index (`0-frame.json`).
    fn write_index(&mut self) -> Result<()> {
        self.session.validate_open()?;

        let index = self.timings.build_index()?;
        let bytes = serde_json::to_vec(&index)?;

        debug!(frames = index.timing.len(), "writing time index");
        self.session.write_to_sink(INDEX_FILE_NAME, &bytes)?;
        self.index_written = true;
        Ok(())
    }

    /// Close the session, finalizing the time index if not yet written.
    ///
    /// Idempotent: a second call performs no further writes. A detected
    /// index gap aborts without writing the index file.
    pub fn close(&mut self) -> Result<()> {
        if !self.session.is_open() {
            return Ok(());
        }

        if !self.index_written {
            self.write_index()?;
        }

        self.session.close();
        debug!("writer session closed");
        Ok(())
    }

    /// Access the underlying sink.
    pub fn sink(&self) -> &S {
        self.session.sink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mapping;
    use crate::io::frame::FRAME_MAGIC;
    use crate::io::sink::MemorySink;
    use crate::schema::JsonSchemaRegistry;
    use crate::util::Error;

    fn metadata() -> Value {
        let mut log_info = Mapping::new();
        log_info.set("start_time", 10.0);
        log_info.set("end_time", 11.0);
        let mut map = Mapping::new();
        map.set("version", "2.0.0");
        map.set("log_info", log_info);
        Value::Mapping(map)
    }

    fn state_update(ts: f64) -> Value {
        let mut update = Mapping::new();
        update.set("timestamp", ts);
        let mut map = Mapping::new();
        map.set("updates", vec![Value::Mapping(update)]);
        Value::Mapping(map)
    }

    fn writer(sink: &mut MemorySink) -> FrameWriter<&mut MemorySink, JsonSchemaRegistry> {
        FrameWriter::new(sink, JsonSchemaRegistry::new())
    }

    #[test]
    fn test_full_session_writes_all_frames() {
        let mut sink = MemorySink::new();
        let mut writer = writer(&mut sink);
        writer.write_metadata(&metadata()).unwrap();
        writer.write_message(0, &state_update(10.0)).unwrap();
        writer.write_message(1, &state_update(10.5)).unwrap();
        writer.close().unwrap();

        let names: Vec<&str> = sink.names().collect();
        assert_eq!(names, vec!["1-frame.pbe", "2-frame.pbe", "3-frame.pbe", "0-frame.json"]);
    }

    #[test]
    fn test_frames_start_with_magic() {
        let mut sink = MemorySink::new();
        let mut writer = writer(&mut sink);
        writer.write_metadata(&metadata()).unwrap();
        writer.write_message(0, &state_update(1.0)).unwrap();
        writer.close().unwrap();

        for name in ["1-frame.pbe", "2-frame.pbe"] {
            let bytes = sink.get(name).unwrap();
            assert_eq!(&bytes[..4], &FRAME_MAGIC);
        }
        // The index is bare JSON, not a magic-prefixed frame
        assert_eq!(sink.get("0-frame.json").unwrap()[0], b'{');
    }

    #[test]
    fn test_close_twice_writes_index_once() {
        let mut sink = MemorySink::new();
        let mut writer = writer(&mut sink);
        writer.write_message(0, &state_update(1.0)).unwrap();
        writer.close().unwrap();
        writer.close().unwrap();

        assert_eq!(sink.count("0-frame.json"), 1);
    }

    #[test]
    fn test_write_after_close_fails() {
        let mut sink = MemorySink::new();
        let mut writer = writer(&mut sink);
        writer.close().unwrap();

        assert!(matches!(
            writer.write_metadata(&metadata()),
            Err(Error::WriterClosed)
        ));
        assert!(matches!(
            writer.write_message(0, &state_update(1.0)),
            Err(Error::WriterClosed)
        ));
    }

    #[test]
    fn test_empty_updates_writes_no_frame() {
        let mut sink = MemorySink::new();
        let mut writer = writer(&mut sink);
        let mut record = Mapping::new();
        record.set("updates", Vec::<Value>::new());

        let err = writer.write_message(0, &Value::Mapping(record)).unwrap_err();
        assert!(matches!(err, Error::Timestamp(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_gap_aborts_close_without_index() {
        let mut sink = MemorySink::new();
        let mut writer = writer(&mut sink);
        writer.write_message(0, &state_update(1.0)).unwrap();
        writer.write_message(2, &state_update(2.0)).unwrap();

        let err = writer.close().unwrap_err();
        assert!(matches!(err, Error::IndexGap { .. }));
        assert_eq!(sink.count("0-frame.json"), 0);
    }

    #[test]
    fn test_index_content() {
        let mut sink = MemorySink::new();
        let mut writer = writer(&mut sink);
        writer.write_metadata(&metadata()).unwrap();
        writer.write_message(0, &state_update(10.0)).unwrap();
        writer.write_message(1, &state_update(10.5)).unwrap();
        writer.close().unwrap();

        let index: serde_json::Value =
            serde_json::from_slice(sink.get("0-frame.json").unwrap()).unwrap();
        assert_eq!(index["startTime"], 10.0);
        assert_eq!(index["endTime"], 11.0);
        assert_eq!(index["timing"][0], serde_json::json!([10.0, 10.0, 0, "2-frame"]));
        assert_eq!(index["timing"][1], serde_json::json!([10.5, 10.5, 1, "3-frame"]));
    }
}
