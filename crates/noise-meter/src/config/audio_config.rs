use crate::config::{default_monitor_while_idle, default_update_interval_ms};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Audio device configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Selected audio device name (None = default device).
    #[serde(default)]
    pub selected_device: Option<String>,

    /// Milliseconds of audio per metering update.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Keep metering while idle so loudness can start a recording.
    #[serde(default = "default_monitor_while_idle")]
    pub monitor_while_idle: bool,
}

impl AudioConfig {
    /// Metering cadence as a [`Duration`].
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            selected_device: None,
            update_interval_ms: default_update_interval_ms(),
            monitor_while_idle: default_monitor_while_idle(),
        }
    }
}
