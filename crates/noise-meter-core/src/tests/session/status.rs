use crate::{RecordingStatus, StatusUpdate};

/// WHAT: Live update flags map to the documented status
/// WHY: Status is derived, never set directly
#[test]
fn given_update_flags_when_deriving_status_then_matches_table() {
    let recording = StatusUpdate::recording(Some(-20.0));
    let paused = StatusUpdate {
        is_recording: false,
        is_done_recording: false,
        metering: None,
    };
    let finished = StatusUpdate::finished();

    assert_eq!(RecordingStatus::from_update(&recording), RecordingStatus::Recording);
    assert_eq!(RecordingStatus::from_update(&paused), RecordingStatus::Paused);
    assert_eq!(RecordingStatus::from_update(&finished), RecordingStatus::Stopped);
}

/// WHAT: is_recording wins even if the done flag is set
/// WHY: Mirrors the evaluation order of the platform callback
#[test]
fn given_recording_and_done_flags_when_deriving_status_then_recording() {
    let update = StatusUpdate {
        is_recording: true,
        is_done_recording: true,
        metering: None,
    };

    assert_eq!(RecordingStatus::from_update(&update), RecordingStatus::Recording);
}

#[test]
fn given_status_when_displaying_then_lowercase_name() {
    assert_eq!(RecordingStatus::default().to_string(), "idle");
    assert_eq!(RecordingStatus::Paused.to_string(), "paused");
}
