use crate::{AUTO_START_THRESHOLD_DB, LoudnessLevel, SILENCE_FLOOR_DB, rms_dbfs};

const LEVEL_TOLERANCE: f64 = 1e-6;

/// WHAT: Missing or NaN metering reads as 0
/// WHY: Invalid platform readings degrade instead of erroring
#[test]
fn given_missing_or_nan_metering_when_extracting_then_level_is_zero() {
    // Given/When: Missing and NaN readings
    let missing = LoudnessLevel::from_metering(None);
    let nan = LoudnessLevel::from_metering(Some(f64::NAN));

    // Then: Both read as 0
    assert_eq!(missing, LoudnessLevel::ZERO);
    assert_eq!(nan, LoudnessLevel::ZERO);
}

/// WHAT: Valid metering passes through unchanged
/// WHY: The controller republishes the platform value as-is
#[test]
fn given_valid_metering_when_extracting_then_value_preserved() {
    let level = LoudnessLevel::from_metering(Some(-42.5));

    assert!((level.db() - -42.5).abs() < LEVEL_TOLERANCE);
}

/// WHAT: Threshold comparison is inclusive
/// WHY: A level exactly at -10 must trigger auto-start
#[test]
fn given_level_at_threshold_when_checking_auto_start_then_triggers() {
    assert!(LoudnessLevel::new(AUTO_START_THRESHOLD_DB).exceeds_auto_start_threshold());
    assert!(LoudnessLevel::ZERO.exceeds_auto_start_threshold());
    assert!(!LoudnessLevel::new(-10.01).exceeds_auto_start_threshold());
}

/// WHAT: A full-scale square wave reads 0 dBFS
/// WHY: 0 is the loudest representable level
#[test]
fn given_full_scale_square_wave_when_metering_then_zero_dbfs() {
    // Given: Alternating +1/-1 samples
    let samples: Vec<f32> = (0..480).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

    // When: Computing RMS level
    let db = rms_dbfs(&samples);

    // Then: Level is 0 dBFS
    assert!(db.abs() < LEVEL_TOLERANCE, "got {db}");
}

/// WHAT: Half amplitude reads about -6 dBFS
/// WHY: Confirms the 20*log10 amplitude scale
#[test]
fn given_half_amplitude_signal_when_metering_then_minus_six_db() {
    let samples = vec![0.5f32; 480];

    let db = rms_dbfs(&samples);

    assert!((db - -6.0206).abs() < 1e-3, "got {db}");
}

/// WHAT: Silence and empty windows read as the floor
/// WHY: log10(0) must not leak -inf into the controller
#[test]
fn given_silence_or_empty_window_when_metering_then_silence_floor() {
    assert_eq!(rms_dbfs(&[0.0; 256]), SILENCE_FLOOR_DB);
    assert_eq!(rms_dbfs(&[]), SILENCE_FLOOR_DB);
    assert_eq!(rms_dbfs(&[1e-12; 16]), SILENCE_FLOOR_DB);
}
