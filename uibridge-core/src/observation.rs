use std::time::SystemTime;

use crate::{BridgeError, Command, NodeId};

/// Observation variants emitted by the queue and dispatcher
///
/// Borrowed payloads keep observation free on the hot append path; observers that
/// want to keep data around must clone it.
#[derive(Debug)]
pub enum Observation<'a> {
    /// A command was appended to the pending batch.
    Enqueued { ts: SystemTime, data: &'a Command },
    /// A batch reached the host.
    Flushed { ts: SystemTime, commands: usize },
    /// A batch was dropped because serialization or the transport failed.
    FlushFailed {
        ts: SystemTime,
        commands: usize,
        error: &'a BridgeError,
    },
    /// A command is about to be sent outside the batch envelope.
    Direct { ts: SystemTime, data: &'a Command },
    /// An image capture is about to be requested.
    Capture {
        ts: SystemTime,
        node: NodeId,
        scale: f64,
    },
}

/// Coarse grouping of [`Observation`]s, for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservationKind {
    /// `Enqueued`
    Queue,
    /// `Flushed` and `FlushFailed`
    Flush,
    /// `Direct` and `Capture`
    Direct,
}

impl Observation<'_> {
    pub fn kind(&self) -> ObservationKind {
        match self {
            Observation::Enqueued { .. } => ObservationKind::Queue,
            Observation::Flushed { .. } | Observation::FlushFailed { .. } => ObservationKind::Flush,
            Observation::Direct { .. } | Observation::Capture { .. } => ObservationKind::Direct,
        }
    }
}
