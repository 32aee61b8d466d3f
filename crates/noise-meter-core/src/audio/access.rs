use crate::{
    CoreResult, MeterError,
    audio::device::select_input_device,
    session::MicrophoneAccess,
};

use std::panic::Location;

use cpal::traits::DeviceTrait;
use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Microphone access check for desktop hosts.
///
/// Desktop platforms have no uniform authorization prompt. A default input
/// device with a usable config counts as a grant, no input device as a
/// denial, and anything else as a failed request.
#[derive(Debug, Clone, Default)]
pub struct CpalMicrophoneAccess {
    selected_device: Option<String>,
}

impl CpalMicrophoneAccess {
    /// Probe `selected_device`, or the host default when `None`.
    pub fn new(selected_device: Option<String>) -> Self {
        Self { selected_device }
    }
}

impl MicrophoneAccess for CpalMicrophoneAccess {
    #[track_caller]
    #[instrument(skip(self))]
    fn request(&self) -> CoreResult<bool> {
        let device = match select_input_device(self.selected_device.as_deref()) {
            Ok(device) => device,
            Err(MeterError::NoMicrophoneFound { .. }) => return Ok(false),
            Err(e) => {
                return Err(MeterError::PermissionError {
                    reason: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let config = device
            .default_input_config()
            .map_err(|e| MeterError::PermissionError {
                reason: format!("Input device unusable: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "Input device available"
        );

        Ok(true)
    }
}
