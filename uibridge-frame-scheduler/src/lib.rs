//! uibridge-frame-scheduler: stock [`FrameScheduler`]s for uibridge.
//!
//! [`TokioFrameScheduler`] approximates a display frame with a timer on a tokio
//! runtime. [`ManualFrameScheduler`] is for hosts that own their frame loop and
//! pump callbacks themselves (vsync handlers, tests).

mod manual;

pub use manual::ManualFrameScheduler;

use std::time::Duration;
use tokio::runtime::{Handle, TryCurrentError};
use uibridge_core::{BridgeConfig, FrameCallback, FrameScheduler};

/// Runs each flush callback one frame interval after it was scheduled.
#[derive(Clone, Debug)]
pub struct TokioFrameScheduler {
    handle: Handle,
    interval: Duration,
}

impl TokioFrameScheduler {
    pub fn new(handle: Handle, interval: Duration) -> Self {
        Self { handle, interval }
    }

    /// Bind to the runtime the caller is running on.
    pub fn current(interval: Duration) -> Result<Self, TryCurrentError> {
        Ok(Self::new(Handle::try_current()?, interval))
    }

    pub fn from_config(handle: Handle, config: &BridgeConfig) -> Self {
        Self::new(handle, config.frame_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameScheduler for TokioFrameScheduler {
    fn schedule_batch_flush(&self, callback: FrameCallback) {
        let interval = self.interval;
        tracing::trace!(target: "uibridge::frame", ?interval, "frame requested");
        self.handle.spawn(async move {
            tokio::time::sleep(interval).await;
            callback();
        });
    }
}
