//! Error types for the bridge.

use thiserror::Error;

/// Result type for calls that reach the host directly.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Failure reported by the host transport.
///
/// The batched path logs both variants the same way; the split only matters to
/// callers of direct requests who want to inspect the host's status code.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TransportError {
    /// The host raised while handling the payload.
    #[error("host raised: {0}")]
    Raised(String),

    /// The host handled the payload and answered with an error indicator.
    #[error("host returned status {code}: {message}")]
    Status { code: i32, message: String },
}

/// Errors surfaced by direct (non-batched) bridge calls.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The host's image capture reported an error.
    #[error("capture failed: {0}")]
    Capture(String),

    /// The host dropped the capture callback without ever invoking it.
    #[error("capture callback dropped before completion")]
    CaptureDropped,

    /// The manager was disposed; the host context is gone.
    #[error("bridge disposed")]
    Disposed,
}

/// Errors loading a [`crate::BridgeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bridge config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("initial_capacity must be non-zero")]
    ZeroCapacity,

    #[error("initial_capacity {requested} exceeds maximum {max}")]
    CapacityTooLarge { requested: usize, max: usize },

    #[error("frame_interval_ms must be non-zero")]
    ZeroFrameInterval,
}
