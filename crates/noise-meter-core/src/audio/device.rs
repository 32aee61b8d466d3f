use crate::{CoreResult, MeterError, session::QualityPreset};

use std::panic::Location;

use cpal::{
    Device, SampleFormat, StreamConfig,
    traits::{DeviceTrait, HostTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, info, warn};

/// Resolve the input device by name, falling back to the host default.
#[track_caller]
#[allow(deprecated)]
pub(crate) fn select_input_device(selected: Option<&str>) -> CoreResult<Device> {
    let host = cpal::default_host();

    if let Some(wanted) = selected {
        let devices = host
            .input_devices()
            .map_err(|e| MeterError::DeviceError {
                reason: format!("Failed to enumerate input devices: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        for device in devices {
            if device.name().is_ok_and(|name| name == wanted) {
                info!(device = wanted, "Using configured input device");
                return Ok(device);
            }
        }

        warn!(device = wanted, "Configured input device not found, using default");
    }

    host.default_input_device()
        .ok_or(MeterError::NoMicrophoneFound {
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Pick an f32 stream config for `preset`, falling back to the device default.
#[track_caller]
pub(crate) fn stream_config(device: &Device, preset: QualityPreset) -> CoreResult<StreamConfig> {
    if let Some((rate, channels)) = preset.preferred_format() {
        let preferred = device
            .supported_input_configs()
            .map_err(|e| MeterError::DeviceError {
                reason: format!("Failed to query input configs: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .filter(|range| {
                range.channels() == channels && range.sample_format() == SampleFormat::F32
            })
            .find_map(|range| range.try_with_sample_rate(rate));

        if let Some(config) = preferred {
            debug!(sample_rate = rate, channels, "Using preset stream config");
            return Ok(config.into());
        }

        debug!(?preset, "Preset format unsupported, using device default");
    }

    let config = device
        .default_input_config()
        .map_err(|e| MeterError::DeviceError {
            reason: format!("Failed to get config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(config.into())
}
