use crate::meter::rms_dbfs;

use std::time::Duration;

/// Longest interval a window covers. Longer requests are clamped.
pub const MAX_METER_INTERVAL: Duration = Duration::from_secs(60);

/// Accumulates interleaved samples and yields one dBFS reading per
/// `update_interval` worth of frames.
///
/// Lives inside the audio callback, so it never allocates after construction.
pub struct MeterWindow {
    buf: Vec<f32>,
    window_len: usize,
}

impl MeterWindow {
    /// Window sized for `update_interval` at the given stream format.
    ///
    /// The interval is clamped to [`MAX_METER_INTERVAL`].
    pub fn new(sample_rate: u32, channels: u16, update_interval: Duration) -> Self {
        let interval = update_interval.min(MAX_METER_INTERVAL);
        let frames = (f64::from(sample_rate) * interval.as_secs_f64()).round() as usize;
        let window_len = frames.max(1).saturating_mul(usize::from(channels.max(1)));

        Self {
            buf: Vec::with_capacity(window_len),
            window_len,
        }
    }

    /// Samples per reading.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Feed a callback's worth of samples, calling `emit` for every window
    /// completed along the way. Partial windows carry over to the next call.
    pub fn push(&mut self, mut data: &[f32], mut emit: impl FnMut(f64)) {
        while !data.is_empty() {
            let take = (self.window_len - self.buf.len()).min(data.len());
            self.buf.extend_from_slice(&data[..take]);
            data = &data[take..];

            if self.buf.len() == self.window_len {
                emit(rms_dbfs(&self.buf));
                self.buf.clear();
            }
        }
    }
}
