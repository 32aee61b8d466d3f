//! Noise Meter Core Library
//!
//! Loudness-driven recording session control: a permission gate, a pure
//! recording state machine, a decibel-to-color classifier, and a cpal-backed
//! recorder that feeds metering updates through an explicit event channel.
//!
//! # Example
//!
//! ```no_run
//! use noise_meter_core::{
//!     CpalMicrophoneAccess, CpalRecorder, PermissionGate, QualityPreset, SessionController,
//! };
//!
//! use std::time::Duration;
//!
//! # async fn run() {
//! let (events_tx, mut events_rx) = tokio::sync::mpsc::channel(64);
//! let recorder = CpalRecorder::new(None, Duration::from_millis(500));
//! let mut controller = SessionController::new(recorder, QualityPreset::High, events_tx, true);
//!
//! let mut gate = PermissionGate::new();
//! controller.resolve_permission(gate.initialize(&CpalMicrophoneAccess::default()));
//!
//! controller.toggle();
//! while let Some(event) = events_rx.recv().await {
//!     controller.handle_meter_event(event);
//!     println!("{} ({})", controller.state().status(), controller.state().color());
//! }
//! # }
//! ```

mod audio;
mod error;
mod meter;
mod session;

pub use {
    audio::{CpalLevelMonitor, CpalMicrophoneAccess, CpalRecorder, CpalSession},
    error::MeterError,
    error::Result as CoreResult,
    meter::{
        AUTO_START_THRESHOLD_DB, ColorBucket, LoudnessLevel, MAX_METER_INTERVAL, MeterWindow,
        SILENCE_FLOOR_DB, rms_dbfs,
    },
    session::{
        Command, ControllerEvent, MeterEvent, MicrophoneAccess, Permission, PermissionGate,
        QualityPreset, Recorder, RecordingSession, RecordingStatus, SessionController,
        SessionState, StatusUpdate,
    },
};
