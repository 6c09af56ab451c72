//! Message kinds of the versioned wire contract.

use std::fmt;

/// The fixed set of message types a frame may carry.
///
/// The schema itself is an external, versioned contract; this enum only names
/// its members so encoders can be looked up and envelopes tagged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    /// Self-describing wrapper around any other kind
    Envelope = 0,
    /// Session start request
    Start = 1,
    /// Log transform request
    TransformLog = 2,
    /// Point-in-time transform request
    TransformLogPointInTime = 3,
    /// Log transform completion notice
    TransformLogDone = 4,
    /// One timestamped world-state update
    StateUpdate = 5,
    /// Stream reconfiguration request
    Reconfigure = 6,
    /// Log metadata (streams, styles, log time bounds)
    Metadata = 7,
    /// Error notification
    Error = 8,
}

impl MessageKind {
    /// Number of message kinds.
    pub const COUNT: usize = 9;

    /// All message kinds, in tag order.
    pub const ALL: [MessageKind; Self::COUNT] = [
        Self::Envelope,
        Self::Start,
        Self::TransformLog,
        Self::TransformLogPointInTime,
        Self::TransformLogDone,
        Self::StateUpdate,
        Self::Reconfigure,
        Self::Metadata,
        Self::Error,
    ];

    /// Qualified type identifier used in envelope `type_url` fields.
    pub const fn type_url(self) -> &'static str {
        match self {
            Self::Envelope => "xviz.v2.Envelope",
            Self::Start => "xviz.v2.Start",
            Self::TransformLog => "xviz.v2.TransformLog",
            Self::TransformLogPointInTime => "xviz.v2.TransformPointInTime",
            Self::TransformLogDone => "xviz.v2.TransformLogDone",
            Self::StateUpdate => "xviz.v2.StateUpdate",
            Self::Reconfigure => "xviz.v2.Reconfigure",
            Self::Metadata => "xviz.v2.Metadata",
            Self::Error => "xviz.v2.Error",
        }
    }

    /// Short tag used in envelope `type` fields.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Envelope => "xviz/envelope",
            Self::Start => "xviz/start",
            Self::TransformLog => "xviz/transform_log",
            Self::TransformLogPointInTime => "xviz/transform_point_in_time",
            Self::TransformLogDone => "xviz/transform_log_done",
            Self::StateUpdate => "xviz/state_update",
            Self::Reconfigure => "xviz/reconfigure",
            Self::Metadata => "xviz/metadata",
            Self::Error => "xviz/error",
        }
    }

    /// Position of this kind in [`MessageKind::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_and_urls() {
        assert_eq!(MessageKind::Metadata.tag(), "xviz/metadata");
        assert_eq!(MessageKind::Metadata.type_url(), "xviz.v2.Metadata");
        assert_eq!(MessageKind::StateUpdate.tag(), "xviz/state_update");
        assert_eq!(MessageKind::StateUpdate.type_url(), "xviz.v2.StateUpdate");
    }

    #[test]
    fn test_all_is_indexed_by_discriminant() {
        for kind in MessageKind::ALL {
            assert_eq!(MessageKind::ALL[kind.index()], kind);
        }
    }
}
