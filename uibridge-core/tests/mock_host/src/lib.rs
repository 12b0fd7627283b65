//! Recording host used by the uibridge test suites.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use uibridge_core::{CaptureCallback, HostTransport, NodeId, TransportError};

/// Everything the host saw, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Sent(String),
    Capture { node: NodeId, scale: f64 },
}

/// How the host answers capture requests.
pub enum CaptureBehavior {
    Bytes(Vec<u8>),
    Fail(String),
    /// Drop the callback without calling it.
    Drop,
    /// Keep the callback until `complete_held` is called.
    Hold,
}

pub struct RecordingTransport {
    events: Mutex<Vec<HostEvent>>,
    failures: Mutex<VecDeque<TransportError>>,
    reply: String,
    capture: Mutex<CaptureBehavior>,
    held: Mutex<Vec<CaptureCallback>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap()
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::with_reply("ok")
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            reply: reply.into(),
            capture: Mutex::new(CaptureBehavior::Bytes(Vec::new())),
            held: Mutex::new(Vec::new()),
        }
    }

    /// Make the next send fail with `error`. Queued failures are used in order.
    pub fn fail_next(&self, error: TransportError) {
        lock(&self.failures).push_back(error);
    }

    pub fn set_capture(&self, behavior: CaptureBehavior) {
        *lock(&self.capture) = behavior;
    }

    /// Resolve the oldest held capture.
    pub fn complete_held(&self, result: Result<Vec<u8>, String>) {
        let callback = lock(&self.held).remove(0);
        callback(result);
    }

    pub fn held_captures(&self) -> usize {
        lock(&self.held).len()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        lock(&self.events).clone()
    }

    /// Raw payloads, including ones the host rejected.
    pub fn sent(&self) -> Vec<String> {
        lock(&self.events)
            .iter()
            .filter_map(|e| match e {
                HostEvent::Sent(payload) => Some(payload.clone()),
                HostEvent::Capture { .. } => None,
            })
            .collect()
    }

    pub fn sent_json(&self) -> Vec<serde_json::Value> {
        self.sent()
            .iter()
            .map(|p| serde_json::from_str(p).unwrap())
            .collect()
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTransport for RecordingTransport {
    fn send(&self, payload: &str) -> Result<String, TransportError> {
        lock(&self.events).push(HostEvent::Sent(payload.to_string()));
        match lock(&self.failures).pop_front() {
            Some(error) => Err(error),
            None => Ok(self.reply.clone()),
        }
    }

    fn capture_to_image(&self, node_id: NodeId, scale: f64, callback: CaptureCallback) {
        lock(&self.events).push(HostEvent::Capture {
            node: node_id,
            scale,
        });
        match &*lock(&self.capture) {
            CaptureBehavior::Bytes(bytes) => callback(Ok(bytes.clone())),
            CaptureBehavior::Fail(message) => callback(Err(message.clone())),
            CaptureBehavior::Drop => drop(callback),
            CaptureBehavior::Hold => lock(&self.held).push(callback),
        }
    }
}
