//! Time index accumulation.
//!
//! Every data frame contributes one [`TimingEntry`] with the min/max of its
//! update timestamps; metadata contributes optional log-level start/end
//! bounds. At session close the accumulated entries are verified to cover the
//! contiguous index run `0..N-1` and persisted as the JSON time index, which
//! lets a server seek to any frame by timestamp without decoding the log.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::Value;
use crate::io::frame::{message_name, DATA_FRAME_OFFSET};
use crate::util::{Error, Result, Timestamp};

/// Timestamp bounds of one data frame, serialized as
/// `[minTimestamp, maxTimestamp, frameIndex, frameName]`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimingEntry(pub Timestamp, pub Timestamp, pub u64, pub String);

/// The persisted time index artifact.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TimeIndex {
    /// Log-level start time, when the metadata carried one.
    #[serde(rename = "startTime", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,

    /// Log-level end time, when the metadata carried one.
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,

    /// Per-frame timestamp bounds, ordered by frame index.
    pub timing: Vec<TimingEntry>,
}

/// Accumulates timing entries over a writing session.
#[derive(Debug, Default)]
pub struct TimingTracker {
    start_time: Option<Timestamp>,
    end_time: Option<Timestamp>,
    messages: BTreeMap<u64, TimingEntry>,
}

impl TimingTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of data frames recorded.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if no data frames were recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get the recorded entry for a frame index.
    pub fn get(&self, index: u64) -> Option<&TimingEntry> {
        self.messages.get(&index)
    }

    /// Record log-level bounds from a metadata record, when present.
    ///
    /// Bounds live under `log_info.start_time` / `log_info.end_time`; a
    /// present numeric value always wins, including zero.
    pub fn record_metadata(&mut self, record: &Value) {
        let Some(log_info) = record.get("log_info") else {
            return;
        };

        if let Some(start) = log_info.get("start_time").and_then(Value::as_f64) {
            self.start_time = Some(start);
        }
        if let Some(end) = log_info.get("end_time").and_then(Value::as_f64) {
            self.end_time = Some(end);
        }
    }

    /// Record the timestamp bounds of one data frame.
    ///
    /// The record must carry a non-empty `updates` sequence whose every entry
    /// has a numeric `timestamp`; anything else is a [`Error::Timestamp`].
    pub fn record_message(&mut self, index: u64, record: &Value) -> Result<()> {
        let updates = record
            .get("updates")
            .and_then(Value::as_sequence)
            .ok_or_else(|| Error::timestamp("state update record has no updates"))?;
        if updates.is_empty() {
            return Err(Error::timestamp("state update record has an empty updates list"));
        }

        let mut min = Timestamp::INFINITY;
        let mut max = Timestamp::NEG_INFINITY;
        for update in updates {
            let ts = update
                .get("timestamp")
                .and_then(Value::as_f64)
                .ok_or_else(|| {
                    Error::timestamp("update entry does not contain a numeric timestamp")
                })?;
            min = min.min(ts);
            max = max.max(ts);
        }

        self.messages
            .insert(index, TimingEntry(min, max, index, message_name(index)));
        Ok(())
    }

    /// Build the final time index.
    ///
    /// Entries come out ordered by frame index. Indices must form the
    /// contiguous run `0..N-1`; a hole fails with [`Error::IndexGap`] naming
    /// the missing physical slots.
    pub fn build_index(&self) -> Result<TimeIndex> {
        let mut timing = Vec::with_capacity(self.messages.len());
        for (&index, entry) in &self.messages {
            let seen = timing.len() as u64;
            if index > seen {
                return Err(Error::IndexGap {
                    from: seen + DATA_FRAME_OFFSET,
                    to: index + DATA_FRAME_OFFSET,
                });
            }
            timing.push(entry.clone());
        }

        Ok(TimeIndex {
            start_time: self.start_time,
            end_time: self.end_time,
            timing,
        })
    }
}
