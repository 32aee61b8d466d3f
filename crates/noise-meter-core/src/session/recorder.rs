use crate::{CoreResult, session::MeterEvent};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Fixed recorder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    /// 44.1 kHz stereo when the device supports it.
    #[default]
    High,
    /// Whatever the device reports as its default input config.
    DeviceDefault,
}

impl QualityPreset {
    /// Preferred `(sample_rate, channels)`, or `None` to take the device default.
    pub fn preferred_format(self) -> Option<(u32, u16)> {
        match self {
            QualityPreset::High => Some((44_100, 2)),
            QualityPreset::DeviceDefault => None,
        }
    }
}

/// Platform capability that produces recording sessions.
pub trait Recorder {
    /// Live handle returned by [`Recorder::start`].
    type Session: RecordingSession;

    /// Create, configure with `preset`, and start a recording.
    ///
    /// Status updates are pushed to `events` tagged with `session_id` until
    /// the session is stopped.
    fn start(
        &mut self,
        session_id: Uuid,
        preset: QualityPreset,
        events: mpsc::Sender<MeterEvent>,
    ) -> CoreResult<Self::Session>;
}

/// Handle to an in-flight recording.
pub trait RecordingSession {
    /// Identifier the session tags its updates with.
    fn session_id(&self) -> Uuid;

    /// Stop capturing and release the input.
    ///
    /// On error the handle stays usable so the stop can be retried.
    fn stop_and_unload(&mut self) -> CoreResult<()>;
}
