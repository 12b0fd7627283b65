use crate::{NodeId, TransportError};

/// Callback handed to the host when a capture is requested.
/// Carries the raw image bytes, or the host's error message.
pub type CaptureCallback = Box<dyn FnOnce(Result<Vec<u8>, String>) + Send + 'static>;

/// Callback handed to the frame scheduler; runs the pending flush.
pub type FrameCallback = Box<dyn FnOnce() + Send + 'static>;

/// The host side of the bridge.
///
/// Implementations must not call back into the same [`crate::UiManager`]'s
/// flushing operations from inside [`HostTransport::send`].
pub trait HostTransport: Send + Sync {
    /// Deliver one serialized payload (a batch envelope or a direct command)
    /// and return the host's raw reply.
    fn send(&self, payload: &str) -> Result<String, TransportError>;

    /// Ask the host to snapshot `node_id` at `scale`. `callback` must be invoked
    /// at most once; dropping it without a call fails the pending capture.
    fn capture_to_image(&self, node_id: NodeId, scale: f64, callback: CaptureCallback);
}

/// Schedules a callback for the next update point (typically the next frame).
///
/// Schedulers don't deduplicate; single-flight is the queue's job. The callback
/// must run later, never from inside `schedule_batch_flush` itself.
pub trait FrameScheduler: Send + Sync {
    fn schedule_batch_flush(&self, callback: FrameCallback);
}
