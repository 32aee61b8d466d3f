use crate::{MAX_METER_INTERVAL, MeterWindow};

use std::time::Duration;

/// WHAT: Window length scales with rate, channels and interval
/// WHY: One reading per update interval regardless of stream format
#[test]
fn given_stream_format_when_sizing_window_then_frames_times_channels() {
    let window = MeterWindow::new(44_100, 2, Duration::from_millis(500));

    assert_eq!(window.window_len(), 22_050 * 2);
}

/// WHAT: Partial callbacks accumulate across calls
/// WHY: cpal buffer sizes rarely align with the metering interval
#[test]
fn given_callbacks_smaller_than_window_when_pushing_then_emits_once_full() {
    // Given: A 100-sample window (1 kHz mono, 100ms)
    let mut window = MeterWindow::new(1_000, 1, Duration::from_millis(100));
    let mut readings = Vec::new();

    // When: Pushing three 40-sample callbacks
    for _ in 0..3 {
        window.push(&[0.5; 40], |db| readings.push(db));
    }

    // Then: Exactly one reading, 20 samples carried over
    assert_eq!(readings.len(), 1);
}

/// WHAT: One large callback yields several readings
/// WHY: Long callbacks must not collapse multiple intervals into one
#[test]
fn given_callback_spanning_many_windows_when_pushing_then_emits_each() {
    let mut window = MeterWindow::new(1_000, 1, Duration::from_millis(100));
    let mut readings = Vec::new();

    window.push(&[1.0; 350], |db| readings.push(db));

    assert_eq!(readings.len(), 3);
    assert!(readings.iter().all(|db| db.abs() < 1e-6));
}

/// WHAT: Zero interval still produces a usable window
/// WHY: Avoids a zero-length window spinning forever
#[test]
fn given_zero_interval_when_sizing_window_then_at_least_one_frame() {
    let window = MeterWindow::new(48_000, 1, Duration::ZERO);

    assert_eq!(window.window_len(), 1);
}

/// WHAT: Oversized intervals are clamped instead of overflowing
/// WHY: A huge configured interval must not size a multi-gigabyte buffer
#[test]
fn given_huge_interval_when_sizing_window_then_clamped_to_max() {
    // Given: The largest representable interval on a stereo stream
    let interval = Duration::from_millis(u64::MAX);

    // When: Sizing the window
    let window = MeterWindow::new(44_100, 2, interval);

    // Then: The window covers MAX_METER_INTERVAL and nothing more
    let frames = 44_100 * MAX_METER_INTERVAL.as_secs() as usize;
    assert_eq!(window.window_len(), frames * 2);
}
