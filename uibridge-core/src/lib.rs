mod batch;
mod blob;
pub mod command;
mod config;
mod error;
mod host;
mod manager;
mod observation;
mod observer;
mod queue;

pub use batch::{Batch, BATCH_UPDATE};
pub use blob::Blob;
pub use command::{AdjacentPosition, Command, NodeId};
pub use config::{BridgeConfig, MAX_INITIAL_CAPACITY};
pub use error::{BridgeError, BridgeResult, ConfigError, TransportError};
pub use host::{CaptureCallback, FrameCallback, FrameScheduler, HostTransport};
pub use manager::UiManager;
pub use observation::{Observation, ObservationKind};
pub use observer::{
    filter_observer, filter_with, no_op_observer, tee_observer, tracing_observer, ObserverFn,
};
pub use queue::{Append, BatchQueue};
