use std::fmt;

use uuid::Uuid;

/// Recording status shown to the user.
///
/// Derived from live recorder updates; there is no setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingStatus {
    /// No session held.
    #[default]
    Idle,
    /// Session is capturing audio.
    Recording,
    /// Session exists but is not capturing and has not finished.
    Paused,
    /// Session reported it finished on its own.
    Stopped,
}

impl RecordingStatus {
    /// Derive the status carried by a live update.
    pub fn from_update(update: &StatusUpdate) -> Self {
        if update.is_recording {
            RecordingStatus::Recording
        } else if !update.is_done_recording {
            RecordingStatus::Paused
        } else {
            RecordingStatus::Stopped
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordingStatus::Idle => "idle",
            RecordingStatus::Recording => "recording",
            RecordingStatus::Paused => "paused",
            RecordingStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a recorder status callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusUpdate {
    /// Recorder is actively capturing.
    pub is_recording: bool,
    /// Recorder has finished and released its input.
    pub is_done_recording: bool,
    /// Loudness of the last window in dB, if the recorder measured one.
    pub metering: Option<f64>,
}

impl StatusUpdate {
    /// An update from a capturing recorder.
    pub fn recording(metering: Option<f64>) -> Self {
        Self {
            is_recording: true,
            is_done_recording: false,
            metering,
        }
    }

    /// The last update a recorder emits.
    pub fn finished() -> Self {
        Self {
            is_recording: false,
            is_done_recording: true,
            metering: None,
        }
    }
}

/// Messages the audio backend pushes onto the controller's event channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeterEvent {
    /// Live update from a recording session.
    Status {
        /// Session that produced the update.
        session_id: Uuid,
        /// The update itself.
        update: StatusUpdate,
    },
    /// Level measured by the idle monitor while no session exists.
    AmbientLevel {
        /// Loudness in dB, if measured.
        metering: Option<f64>,
    },
}
