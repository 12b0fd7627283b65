use serde::Deserialize;
use std::time::Duration;

use crate::ConfigError;

const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Largest `initial_capacity` accepted. The queue still grows past it on demand;
/// this only bounds the up-front allocation.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 16;

/// Tunables for a bridge instance.
///
/// ```toml
/// frame_interval_ms = 16
/// initial_capacity = 1024
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Delay between a flush request and the scheduled flush, for schedulers that
    /// drive frames off a timer.
    pub frame_interval_ms: u64,
    /// Commands the queue can hold before it reallocates.
    pub initial_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl BridgeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: BridgeConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.initial_capacity,
                max: MAX_INITIAL_CAPACITY,
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
