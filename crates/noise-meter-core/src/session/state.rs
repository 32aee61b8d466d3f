//! Pure recording state machine.
//!
//! Every input, whether a user action, a recorder callback, or the outcome
//! of a start/stop the controller just executed, is a [`ControllerEvent`]
//! fed through [`SessionState::apply`]. The returned [`Command`] is the only
//! way the state machine asks for I/O.

use crate::{
    meter::{ColorBucket, LoudnessLevel},
    session::{MeterEvent, Permission, RecordingStatus},
};

use tracing::{debug, info, warn};
use uuid::Uuid;

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// The permission request resolved.
    PermissionResolved(Permission),
    /// User pressed the record control.
    Toggle,
    /// Explicit start request.
    StartRequested,
    /// Explicit stop request.
    StopRequested,
    /// Message from the audio backend.
    Meter(MeterEvent),
    /// Recorder started and a handle is now held.
    Started {
        /// Session that was started.
        session_id: Uuid,
    },
    /// Recorder failed to start; no handle was created.
    StartFailed,
    /// Recorder stopped and its handle was released.
    Stopped {
        /// Session that was stopped.
        session_id: Uuid,
    },
    /// Recorder failed to stop; the handle is still held.
    StopFailed,
}

/// I/O the state machine asks the controller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new recording.
    Start,
    /// Stop the held recording.
    Stop {
        /// Session to stop.
        session_id: Uuid,
    },
}

/// Why a start was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartTrigger {
    User,
    Loudness,
}

/// Everything the recording screen renders, in one record.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    permission: Permission,
    active_session: Option<Uuid>,
    status: RecordingStatus,
    level: LoudnessLevel,
    auto_start: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SessionState {
    /// Initial state: idle, permission unknown, level 0.
    pub fn new(auto_start: bool) -> Self {
        Self {
            permission: Permission::Unknown,
            active_session: None,
            status: RecordingStatus::Idle,
            level: LoudnessLevel::ZERO,
            auto_start,
        }
    }

    /// Permission as last resolved.
    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Session currently held, if any.
    pub fn active_session(&self) -> Option<Uuid> {
        self.active_session
    }

    /// Whether a session handle is held.
    pub fn is_recording_session_active(&self) -> bool {
        self.active_session.is_some()
    }

    /// Status text source.
    pub fn status(&self) -> RecordingStatus {
        self.status
    }

    /// Last observed loudness.
    pub fn level(&self) -> LoudnessLevel {
        self.level
    }

    /// Display color for the last observed loudness.
    pub fn color(&self) -> ColorBucket {
        ColorBucket::classify(self.level)
    }

    /// Whether loudness may start a recording on its own.
    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    /// Advance the state machine by one event.
    pub fn apply(&mut self, event: ControllerEvent) -> Option<Command> {
        match event {
            ControllerEvent::PermissionResolved(permission) => {
                if self.permission == Permission::Unknown {
                    self.permission = permission;
                } else {
                    debug!(current = ?self.permission, ignored = ?permission, "Permission already resolved");
                }
                None
            }
            ControllerEvent::Toggle => match self.active_session {
                Some(session_id) => Some(Command::Stop { session_id }),
                None => self.request_start(StartTrigger::User),
            },
            ControllerEvent::StartRequested => {
                if let Some(session_id) = self.active_session {
                    debug!(session_id = %session_id, "Start ignored, session already active");
                    return None;
                }
                self.request_start(StartTrigger::User)
            }
            ControllerEvent::StopRequested => self
                .active_session
                .map(|session_id| Command::Stop { session_id }),
            ControllerEvent::Meter(MeterEvent::Status { session_id, update }) => {
                if self.active_session != Some(session_id) {
                    debug!(session_id = %session_id, "Discarding update from stale session");
                    return None;
                }

                self.status = RecordingStatus::from_update(&update);
                if update.is_recording {
                    self.publish_level(LoudnessLevel::from_metering(update.metering))
                } else {
                    None
                }
            }
            ControllerEvent::Meter(MeterEvent::AmbientLevel { metering }) => {
                if self.active_session.is_some() {
                    return None;
                }
                self.publish_level(LoudnessLevel::from_metering(metering))
            }
            ControllerEvent::Started { session_id } => {
                self.active_session = Some(session_id);
                None
            }
            ControllerEvent::StartFailed | ControllerEvent::StopFailed => None,
            ControllerEvent::Stopped { session_id } => {
                if self.active_session == Some(session_id) {
                    self.active_session = None;
                    self.status = RecordingStatus::Idle;
                }
                None
            }
        }
    }

    fn publish_level(&mut self, level: LoudnessLevel) -> Option<Command> {
        self.level = level;

        if self.active_session.is_none() && self.auto_start && level.exceeds_auto_start_threshold() {
            debug!(level_db = level.db(), "Loudness crossed auto-start threshold");
            return self.request_start(StartTrigger::Loudness);
        }

        None
    }

    fn request_start(&self, trigger: StartTrigger) -> Option<Command> {
        if !self.permission.is_granted() {
            match trigger {
                StartTrigger::User => warn!("Audio recording permission not granted."),
                StartTrigger::Loudness => {
                    debug!("Audio recording permission not granted, auto-start skipped")
                }
            }
            return None;
        }

        info!(trigger = ?trigger, "Starting recording");
        Some(Command::Start)
    }
}
