use std::sync::{Mutex, MutexGuard, PoisonError};
use uibridge_core::{FrameCallback, FrameScheduler};

/// Holds flush callbacks until the host says a frame happened.
#[derive(Default)]
pub struct ManualFrameScheduler {
    frames: Mutex<Vec<FrameCallback>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn frames(&self) -> MutexGuard<'_, Vec<FrameCallback>> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run every callback scheduled so far and return how many ran.
    /// Callbacks scheduled while this frame runs wait for the next one.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.frames());
        let count = due.len();
        for callback in due {
            callback();
        }
        count
    }

    /// Callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.frames().len()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn schedule_batch_flush(&self, callback: FrameCallback) {
        self.frames().push(callback);
    }
}

impl std::fmt::Debug for ManualFrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualFrameScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
