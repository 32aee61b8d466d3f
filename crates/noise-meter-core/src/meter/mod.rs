mod color;
mod level;
mod window;

pub use {
    color::ColorBucket,
    level::{AUTO_START_THRESHOLD_DB, LoudnessLevel, SILENCE_FLOOR_DB, rms_dbfs},
    window::{MAX_METER_INTERVAL, MeterWindow},
};
