//! Integration tests for writing a frame log to disk and verifying the
//! produced artifacts: frame files, naming convention, and time index.

use std::fs;

use tempfile::tempdir;
use xviz_io::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn metadata() -> Value {
    let mut log_info = Mapping::new();
    log_info.set("start_time", 1000.0);
    log_info.set("end_time", 1001.5);

    let mut streams = Mapping::new();
    streams.set("/vehicle_pose", Mapping::new());

    let mut map = Mapping::new();
    map.set("version", "2.0.0");
    map.set("streams", streams);
    map.set("log_info", log_info);
    Value::Mapping(map)
}

fn state_update(timestamps: &[f64]) -> Value {
    let updates: Vec<Value> = timestamps
        .iter()
        .map(|ts| {
            let mut update = Mapping::new();
            update.set("timestamp", *ts);
            Value::Mapping(update)
        })
        .collect();

    let mut map = Mapping::new();
    map.set("update_type", "INCREMENTAL");
    map.set("updates", updates);
    Value::Mapping(map)
}

#[test]
fn test_full_log_round_trip() {
    init_tracing();
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("log");

    let sink = FileSink::new(&out).expect("Failed to create sink");
    let mut writer = FrameWriter::new(sink, JsonSchemaRegistry::new());

    writer.write_metadata(&metadata()).expect("Failed to write metadata");
    writer.write_message(0, &state_update(&[1000.0])).expect("Failed to write frame 0");
    writer.write_message(1, &state_update(&[1000.5, 1001.5])).expect("Failed to write frame 1");
    writer.close().expect("Failed to close writer");

    let mut names: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["0-frame.json", "1-frame.pbe", "2-frame.pbe", "3-frame.pbe"]
    );

    // Every frame file leads with the 4 magic bytes
    for name in ["1-frame.pbe", "2-frame.pbe", "3-frame.pbe"] {
        let bytes = fs::read(out.join(name)).unwrap();
        assert_eq!(&bytes[..4], &[0x50, 0x42, 0x45, 0x31], "magic in {name}");
    }

    // The index maps frames to their timestamp bounds
    let index: serde_json::Value =
        serde_json::from_slice(&fs::read(out.join("0-frame.json")).unwrap()).unwrap();
    assert_eq!(index["startTime"], 1000.0);
    assert_eq!(index["endTime"], 1001.5);
    let timing = index["timing"].as_array().unwrap();
    assert_eq!(timing.len(), 2);
    assert_eq!(timing[0], serde_json::json!([1000.0, 1000.0, 0, "2-frame"]));
    assert_eq!(timing[1], serde_json::json!([1000.5, 1001.5, 1, "3-frame"]));
}

#[test]
fn test_interrupted_session_yields_truncated_index() {
    init_tracing();
    let dir = tempdir().expect("Failed to create temp dir");

    let sink = FileSink::new(dir.path()).unwrap();
    let mut writer = FrameWriter::new(sink, JsonSchemaRegistry::new());
    writer.write_metadata(&metadata()).unwrap();
    writer.write_message(0, &state_update(&[1000.0])).unwrap();

    // A signal handler would call close() here, mid-log
    writer.close().unwrap();

    let index: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("0-frame.json")).unwrap()).unwrap();
    assert_eq!(index["timing"].as_array().unwrap().len(), 1);

    // Closed is terminal
    assert!(writer.write_message(1, &state_update(&[1000.5])).is_err());
    assert!(writer.close().is_ok());
}

#[test]
fn test_file_sink_creates_nested_directories() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("a").join("b").join("log");

    let mut sink = FileSink::new(&nested).expect("Failed to create sink");
    sink.write("0-frame.json", b"{}").unwrap();

    assert!(nested.join("0-frame.json").is_file());
    assert_eq!(sink.dir(), nested.as_path());
}

#[test]
fn test_metadata_only_log() {
    let dir = tempdir().expect("Failed to create temp dir");

    let sink = FileSink::new(dir.path()).unwrap();
    let mut writer = FrameWriter::new(sink, JsonSchemaRegistry::new());
    writer.write_metadata(&metadata()).unwrap();
    writer.close().unwrap();

    let index: serde_json::Value =
        serde_json::from_slice(&fs::read(dir.path().join("0-frame.json")).unwrap()).unwrap();
    assert_eq!(index["timing"], serde_json::json!([]));
    assert_eq!(index["startTime"], 1000.0);
}
