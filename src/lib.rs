//! uibridge: coalesces UI mutation commands into one `batchUpdate` per frame
//! and ships them to a host renderer.
//!
//! This facade re-exports the core queue/dispatcher and the stock frame
//! schedulers so hosts only need a single dependency.

pub use uibridge_core::*;
pub use uibridge_frame_scheduler::{ManualFrameScheduler, TokioFrameScheduler};
