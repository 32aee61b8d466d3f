use error_location::ErrorLocation;
use thiserror::Error;

/// Metering and recording errors with source location tracking.
#[derive(Error, Debug)]
pub enum MeterError {
    /// Microphone authorization request failed before yielding an outcome.
    #[error("Permission request failed: {reason} {location}")]
    PermissionError {
        /// Description of the request failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recorder could not be prepared or started.
    #[error("Failed to start recording: {reason} {location}")]
    StartFailure {
        /// Description of the start failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recorder could not be stopped or released.
    #[error("Failed to stop recording: {reason} {location}")]
    StopFailure {
        /// Description of the stop failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`MeterError`].
pub type Result<T> = std::result::Result<T, MeterError>;
