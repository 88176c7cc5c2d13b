//! Frame-rate monitoring for the HUD.

use std::time::{Duration, Instant};

/// Frame rate below which the HUD flags a performance warning.
pub const DEFAULT_WARNING_FPS: f32 = 30.0;

/// Weight of the newest sample in the moving average.
const SMOOTHING: f32 = 0.1;

/// Exponential moving average of frame intervals.
#[derive(Debug, Clone)]
pub struct FrameStats {
    last: Option<Instant>,
    avg_interval: Option<f32>,
    frames: u64,
    warning_fps: f32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_FPS)
    }
}

impl FrameStats {
    pub fn new(warning_fps: f32) -> Self {
        Self {
            last: None,
            avg_interval: None,
            frames: 0,
            warning_fps,
        }
    }

    /// Record a frame at `now`, returning the interval since the previous one.
    pub fn record(&mut self, now: Instant) -> Duration {
        self.frames += 1;
        let interval = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        if self.last.is_some() {
            let secs = interval.as_secs_f32();
            self.avg_interval = Some(match self.avg_interval {
                Some(avg) => avg + (secs - avg) * SMOOTHING,
                None => secs,
            });
        }
        self.last = Some(now);
        interval
    }

    /// Forget the last timestamp so a pause is not counted as a slow frame.
    pub fn resume(&mut self) {
        self.last = None;
    }

    /// Smoothed frames per second, once two frames have been seen.
    pub fn fps(&self) -> Option<f32> {
        self.avg_interval
            .filter(|secs| *secs > 0.0)
            .map(|secs| 1.0 / secs)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_degraded(&self) -> bool {
        self.fps().is_some_and(|fps| fps < self.warning_fps)
    }
}
