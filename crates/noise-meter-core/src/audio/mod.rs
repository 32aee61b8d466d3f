mod access;
pub(crate) mod capture;
mod device;
mod monitor;

pub use {
    access::CpalMicrophoneAccess,
    capture::{CpalRecorder, CpalSession},
    monitor::CpalLevelMonitor,
};
