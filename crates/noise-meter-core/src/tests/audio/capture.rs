use crate::{
    CpalRecorder, MeterEvent, MeterWindow, QualityPreset, Recorder, RecordingSession,
    audio::capture::StatusFeed,
};

use std::time::Duration;

use tokio::sync::mpsc;
use uuid::Uuid;

/// WHAT: Each completed window becomes one recording update for the session
/// WHY: The controller samples loudness only from tagged recording updates
#[test]
fn given_full_window_of_audio_when_feeding_then_tagged_recording_update_sent() {
    // Given: A 100-sample window feeding a session channel
    let (events_tx, mut events_rx) = mpsc::channel(8);
    let session_id = Uuid::new_v4();
    let window = MeterWindow::new(1_000, 1, Duration::from_millis(100));
    let mut feed = StatusFeed::new(session_id, window, events_tx);

    // When: Pushing one and a half windows of full-scale audio
    feed.push(&[1.0; 150]);

    // Then: Exactly one update, tagged and carrying a 0 dB reading
    let event = events_rx.try_recv().unwrap();
    assert!(matches!(
        event,
        MeterEvent::Status { session_id: id, update }
            if id == session_id
                && update.is_recording
                && !update.is_done_recording
                && update.metering.is_some_and(|db| db.abs() < 1e-6)
    ));
    assert!(events_rx.try_recv().is_err());
}

/// WHAT: A full channel drops updates instead of blocking
/// WHY: The audio callback must never wait on the controller
#[test]
fn given_full_channel_when_feeding_then_extra_updates_dropped() {
    // Given: A channel with room for a single event
    let (events_tx, mut events_rx) = mpsc::channel(1);
    let window = MeterWindow::new(1_000, 1, Duration::from_millis(100));
    let mut feed = StatusFeed::new(Uuid::new_v4(), window, events_tx);

    // When: Pushing three windows in one callback
    feed.push(&[0.5; 300]);

    // Then: One update queued, the rest dropped
    assert!(events_rx.try_recv().is_ok());
    assert!(events_rx.try_recv().is_err());
}

/// WHAT: Partial windows send nothing
/// WHY: Readings are per update interval, not per callback
#[test]
fn given_partial_window_when_feeding_then_no_update() {
    let (events_tx, mut events_rx) = mpsc::channel(8);
    let window = MeterWindow::new(1_000, 1, Duration::from_millis(100));
    let mut feed = StatusFeed::new(Uuid::new_v4(), window, events_tx);

    feed.push(&[0.5; 99]);

    assert!(events_rx.try_recv().is_err());
}

/// WHAT: A real device session emits metering updates and stops cleanly
/// WHY: End-to-end check of the cpal backend on a machine with a microphone
#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn given_default_device_when_recording_then_status_updates_arrive() {
    // Given: A recorder on the default device metering every 100ms
    let (events_tx, mut events_rx) = mpsc::channel(64);
    let mut recorder = CpalRecorder::new(None, Duration::from_millis(100));
    let session_id = Uuid::new_v4();

    // When: Recording for half a second
    let mut session = recorder
        .start(session_id, QualityPreset::High, events_tx)
        .unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    session.stop_and_unload().unwrap();

    // Then: At least one recording update tagged with the session arrived
    let mut saw_metering = false;
    while let Ok(event) = events_rx.try_recv() {
        if let MeterEvent::Status { session_id: id, update } = event {
            assert_eq!(id, session_id);
            saw_metering |= update.is_recording && update.metering.is_some();
        }
    }
    assert!(saw_metering);

    // And: A second stop reports the session as already unloaded
    assert!(session.stop_and_unload().is_err());
}
