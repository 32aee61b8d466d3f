use crate::{
    CoreResult, MeterError,
    audio::device::{select_input_device, stream_config},
    meter::MeterWindow,
    session::{MeterEvent, QualityPreset, Recorder, RecordingSession, StatusUpdate},
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
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Recorder backed by the default cpal host.
#[derive(Debug, Clone)]
pub struct CpalRecorder {
    selected_device: Option<String>,
    update_interval: Duration,
}

impl CpalRecorder {
    /// Recorder for `selected_device` (host default when `None`) that meters
    /// once per `update_interval`.
    pub fn new(selected_device: Option<String>, update_interval: Duration) -> Self {
        Self {
            selected_device,
            update_interval,
        }
    }
}

impl Recorder for CpalRecorder {
    type Session = CpalSession;

    #[track_caller]
    #[instrument(skip(self, events))]
    fn start(
        &mut self,
        session_id: Uuid,
        preset: QualityPreset,
        events: mpsc::Sender<MeterEvent>,
    ) -> CoreResult<CpalSession> {
        let device = select_input_device(self.selected_device.as_deref()).map_err(|e| {
            MeterError::StartFailure {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;
        let config = stream_config(&device, preset).map_err(|e| MeterError::StartFailure {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let mut feed = StatusFeed::new(
            session_id,
            MeterWindow::new(config.sample_rate, config.channels, self.update_interval),
            events.clone(),
        );

        let cb_shutdown = Arc::clone(&shutdown);
        let err_events = events.clone();

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Once stop() sets the flag no more samples or updates
                    // leave the callback, even if cpal fires once more.
                    if cb_shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    feed.push(data);
                },
                move |err| {
                    error!(session_id = %session_id, "Audio stream error: {}", err);
                    if matches!(err, cpal::StreamError::DeviceNotAvailable) {
                        let _ = err_events.try_send(MeterEvent::Status {
                            session_id,
                            update: StatusUpdate::finished(),
                        });
                    }
                },
                None,
            )
            .map_err(|e| MeterError::StartFailure {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| MeterError::StartFailure {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(
            session_id = %session_id,
            sample_rate = config.sample_rate,
            channels = config.channels,
            "Audio capture started"
        );

        Ok(CpalSession {
            session_id,
            stream: Some(stream),
            shutdown,
            events,
        })
    }
}

/// Live cpal recording. Audio is metered and discarded, never kept.
pub struct CpalSession {
    session_id: Uuid,
    stream: Option<Stream>,
    shutdown: Arc<AtomicBool>,
    events: mpsc::Sender<MeterEvent>,
}

impl RecordingSession for CpalSession {
    fn session_id(&self) -> Uuid {
        self.session_id
    }

    #[track_caller]
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    fn stop_and_unload(&mut self) -> CoreResult<()> {
        let Some(stream) = self.stream.take() else {
            return Err(MeterError::StopFailure {
                reason: "Recording already unloaded".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        // Callbacks that race the drop see the flag and emit nothing.
        self.shutdown.store(true, Ordering::Release);
        drop(stream);

        if self
            .events
            .try_send(MeterEvent::Status {
                session_id: self.session_id,
                update: StatusUpdate::finished(),
            })
            .is_err()
        {
            debug!("Final status update not delivered");
        }

        info!("Audio capture stopped");

        Ok(())
    }
}

/// Turns callback audio into `MeterEvent::Status` updates for one session.
pub(crate) struct StatusFeed {
    session_id: Uuid,
    window: MeterWindow,
    events: mpsc::Sender<MeterEvent>,
}

impl StatusFeed {
    pub(crate) fn new(
        session_id: Uuid,
        window: MeterWindow,
        events: mpsc::Sender<MeterEvent>,
    ) -> Self {
        Self {
            session_id,
            window,
            events,
        }
    }

    /// Meter `data` and send one update per completed window. Never blocks:
    /// a full channel drops the update.
    pub(crate) fn push(&mut self, data: &[f32]) {
        let session_id = self.session_id;
        let events = &self.events;
        self.window.push(data, |db| {
            let event = MeterEvent::Status {
                session_id,
                update: StatusUpdate::recording(Some(db)),
            };
            if events.try_send(event).is_err() {
                warn!(session_id = %session_id, "Meter event channel full, dropping update");
            }
        });
    }
}
