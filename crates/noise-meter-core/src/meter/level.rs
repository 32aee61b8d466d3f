use std::fmt;

use tracing::debug;

/// Level at or above which an idle controller starts a recording on its own.
pub const AUTO_START_THRESHOLD_DB: f64 = -10.0;

/// Reading reported for digital silence.
///
/// Matches the floor mobile recorders report for average power, so levels
/// from the cpal backend land on the same scale as platform metering.
pub const SILENCE_FLOOR_DB: f64 = -160.0;

/// Instantaneous loudness on a decibel-like scale, 0 being the loudest
/// representable value.
///
/// Never NaN: every constructor degrades invalid input to 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct LoudnessLevel(f64);

impl LoudnessLevel {
    /// The level before any sample has been observed.
    pub const ZERO: LoudnessLevel = LoudnessLevel(0.0);

    /// Builds a level from a raw decibel value. NaN degrades to 0.
    pub fn new(db: f64) -> Self {
        if db.is_nan() { Self::ZERO } else { Self(db) }
    }

    /// Extracts a level from an optional platform metering field.
    ///
    /// A missing field or a NaN reading is not an error: it reads as 0.
    pub fn from_metering(metering: Option<f64>) -> Self {
        match metering {
            Some(db) if !db.is_nan() => Self(db),
            other => {
                debug!(metering = ?other, "Invalid metering value, using 0");
                Self::ZERO
            }
        }
    }

    /// Raw decibel value.
    pub fn db(self) -> f64 {
        self.0
    }

    /// Whether this level should trigger an automatic start while idle.
    pub fn exceeds_auto_start_threshold(self) -> bool {
        self.0 >= AUTO_START_THRESHOLD_DB
    }
}

impl fmt::Display for LoudnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} dB", self.0)
    }
}

/// RMS level of a window of f32 samples in dBFS.
///
/// Empty or silent windows read as [`SILENCE_FLOOR_DB`].
pub fn rms_dbfs(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return SILENCE_FLOOR_DB;
    }

    let sum_sq: f64 = samples
        .iter()
        .map(|&s| {
            let s = f64::from(s);
            s * s
        })
        .sum();
    let rms = (sum_sq / samples.len() as f64).sqrt();

    if rms <= 0.0 || !rms.is_finite() {
        return SILENCE_FLOOR_DB;
    }

    (20.0 * rms.log10()).max(SILENCE_FLOOR_DB)
}
