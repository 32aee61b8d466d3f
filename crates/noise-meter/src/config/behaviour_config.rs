use crate::config::default_auto_start;

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Start recording on its own when loudness reaches -10 dB while idle.
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            auto_start: default_auto_start(),
        }
    }
}
