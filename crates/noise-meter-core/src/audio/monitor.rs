use crate::{
    CoreResult, MeterError,
    audio::device::{select_input_device, stream_config},
    meter::MeterWindow,
    session::{MeterEvent, QualityPreset},
};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use cpal::{
    Stream,
    traits::{DeviceTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, trace};

/// Meters the input while no recording exists so loudness can start one.
///
/// Keeps no audio. Dropping the monitor closes its stream.
pub struct CpalLevelMonitor {
    stream: Option<Stream>,
    shutdown: Arc<AtomicBool>,
}

impl CpalLevelMonitor {
    /// Open an input stream that pushes one
    /// [`MeterEvent::AmbientLevel`] per `update_interval`.
    #[track_caller]
    #[instrument(skip(events))]
    pub fn start(
        selected_device: Option<&str>,
        update_interval: Duration,
        events: mpsc::Sender<MeterEvent>,
    ) -> CoreResult<Self> {
        let device = select_input_device(selected_device)?;
        let config = stream_config(&device, QualityPreset::DeviceDefault)?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let cb_shutdown = Arc::clone(&shutdown);
        let mut window = MeterWindow::new(config.sample_rate, config.channels, update_interval);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if cb_shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    window.push(data, |db| {
                        // Ambient levels are advisory; a full channel just
                        // means the consumer is busy.
                        if events
                            .try_send(MeterEvent::AmbientLevel { metering: Some(db) })
                            .is_err()
                        {
                            trace!("Ambient level dropped");
                        }
                    });
                },
                |err| {
                    error!("Level monitor stream error: {}", err);
                },
                None,
            )
            .map_err(|e| MeterError::DeviceError {
                reason: format!("Failed to build monitor stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| MeterError::DeviceError {
            reason: format!("Failed to start monitor stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            "Level monitor started"
        );

        Ok(Self {
            stream: Some(stream),
            shutdown,
        })
    }

    /// Close the stream. Idempotent.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if self.stream.take().is_some() {
            info!("Level monitor stopped");
        }
    }
}

impl Drop for CpalLevelMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
