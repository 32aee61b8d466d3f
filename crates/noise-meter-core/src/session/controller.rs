use crate::session::{
    Command, ControllerEvent, MeterEvent, Permission, QualityPreset, Recorder, RecordingSession,
    SessionState,
};

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Owns the single in-flight recording and drives [`SessionState`].
///
/// Not thread-safe by intent: one task owns the controller and feeds it
/// events one at a time, so each call is an atomic state update. Recorder
/// calls run synchronously on that task; stream setup and teardown are short
/// and never sleep.
pub struct SessionController<R: Recorder> {
    recorder: R,
    preset: QualityPreset,
    events_tx: mpsc::Sender<MeterEvent>,
    state: SessionState,
    session: Option<R::Session>,
}

impl<R: Recorder> SessionController<R> {
    /// Create an idle controller.
    ///
    /// Sessions it starts push their updates to `events_tx`; whoever holds
    /// the receiving end must forward them to [`Self::handle_meter_event`].
    pub fn new(
        recorder: R,
        preset: QualityPreset,
        events_tx: mpsc::Sender<MeterEvent>,
        auto_start: bool,
    ) -> Self {
        Self {
            recorder,
            preset,
            events_tx,
            state: SessionState::new(auto_start),
            session: None,
        }
    }

    /// Current state record.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a session handle is held.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Record the permission outcome.
    pub fn resolve_permission(&mut self, permission: Permission) {
        self.dispatch(ControllerEvent::PermissionResolved(permission));
    }

    /// Start if idle, stop otherwise.
    #[instrument(skip(self))]
    pub fn toggle(&mut self) {
        self.dispatch(ControllerEvent::Toggle);
    }

    /// Start a recording if none is held.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        self.dispatch(ControllerEvent::StartRequested);
    }

    /// Stop the held recording. A no-op when idle.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        self.dispatch(ControllerEvent::StopRequested);
    }

    /// Apply one message from the audio backend.
    pub fn handle_meter_event(&mut self, event: MeterEvent) {
        self.dispatch(ControllerEvent::Meter(event));
    }

    fn dispatch(&mut self, event: ControllerEvent) {
        if let Some(command) = self.state.apply(event) {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Start => {
                let session_id = Uuid::new_v4();
                match self
                    .recorder
                    .start(session_id, self.preset, self.events_tx.clone())
                {
                    Ok(session) => {
                        self.session = Some(session);
                        info!(session_id = %session_id, "Recording started");
                        self.dispatch(ControllerEvent::Started { session_id });
                    }
                    Err(e) => {
                        error!(session_id = %session_id, error = ?e, "Failed to start recording");
                        self.dispatch(ControllerEvent::StartFailed);
                    }
                }
            }
            Command::Stop { session_id } => {
                let Some(session) = self.session.as_mut() else {
                    debug!(session_id = %session_id, "Stop requested with no session held");
                    return;
                };

                match session.stop_and_unload() {
                    Ok(()) => {
                        self.session = None;
                        info!(session_id = %session_id, "Recording stopped");
                        self.dispatch(ControllerEvent::Stopped { session_id });
                    }
                    Err(e) => {
                        error!(session_id = %session_id, error = ?e, "Failed to stop recording");
                        self.dispatch(ControllerEvent::StopFailed);
                    }
                }
            }
        }
    }
}

impl<R: Recorder> Drop for SessionController<R> {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take()
            && let Err(e) = session.stop_and_unload()
        {
            error!(session_id = %session.session_id(), error = ?e, "Failed to release recording on shutdown");
        }
    }
}
