use noise_meter_core::{ColorBucket, RecordingStatus, SessionState};

/// Glyph drawn on the record control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// No session held; pressing starts one.
    Circle,
    /// Session held; pressing stops it.
    StopCircle,
}

/// Everything the tray renders, derived from the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayView {
    /// Record control glyph.
    pub glyph: Glyph,
    /// Background fill from the current loudness.
    pub color: ColorBucket,
    /// Status text source.
    pub status: RecordingStatus,
}

impl TrayView {
    /// Project the controller state onto the tray.
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            glyph: if state.is_recording_session_active() {
                Glyph::StopCircle
            } else {
                Glyph::Circle
            },
            color: state.color(),
            status: state.status(),
        }
    }

    /// Status line shown in the tooltip and menu.
    pub fn status_text(&self) -> String {
        format!("Recording status: {}", self.status)
    }
}

impl Default for TrayView {
    fn default() -> Self {
        Self::from_state(&SessionState::default())
    }
}
