mod controller;
mod permission;
mod recorder;
mod state;
mod status;

pub use {
    controller::SessionController,
    permission::{MicrophoneAccess, Permission, PermissionGate},
    recorder::{QualityPreset, Recorder, RecordingSession},
    state::{Command, ControllerEvent, SessionState},
    status::{MeterEvent, RecordingStatus, StatusUpdate},
};
