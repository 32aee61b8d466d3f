mod audio_config;
mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;

pub(crate) use {audio_config::AudioConfig, behaviour_config::BehaviourConfig, config::Config};

pub(crate) const DEFAULT_AUTO_START: bool = true;
pub(crate) const DEFAULT_MONITOR_WHILE_IDLE: bool = true;
pub(crate) const DEFAULT_UPDATE_INTERVAL_MS: u64 = 500;
pub(crate) const MAX_UPDATE_INTERVAL_MS: u64 = 10_000;

pub(crate) fn default_auto_start() -> bool {
    DEFAULT_AUTO_START
}

pub(crate) fn default_monitor_while_idle() -> bool {
    DEFAULT_MONITOR_WHILE_IDLE
}

pub(crate) fn default_update_interval_ms() -> u64 {
    DEFAULT_UPDATE_INTERVAL_MS
}
