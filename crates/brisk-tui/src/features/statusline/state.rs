//! Status line state types.

use std::time::Duration;

/// What the status line shows this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusLine {
    pub focus: &'static str,
    pub debounce: &'static str,
    pub processed: u64,
    pub fps: f32,
}

/// Weight of the newest frame in the moving average.
const SMOOTHING: f32 = 0.1;

/// Assumed rate before the first frame has been measured.
const INITIAL_FPS: f32 = 60.0;

/// Exponential moving average of the draw rate.
#[derive(Debug)]
pub struct StatusLineAccumulator {
    average: f32,
}

impl Default for StatusLineAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLineAccumulator {
    pub fn new() -> Self {
        Self {
            average: INITIAL_FPS,
        }
    }

    /// Folds in the time since the previous draw. Zero-length frames are skipped.
    pub fn on_frame(&mut self, since_last: Duration) {
        let secs = since_last.as_secs_f32();
        if secs > 0.0 {
            self.average += SMOOTHING * (secs.recip() - self.average);
        }
    }

    /// Smoothed rate, one decimal.
    pub fn fps(&self) -> f32 {
        (self.average * 10.0).round() / 10.0
    }
}
