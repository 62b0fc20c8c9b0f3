use super::TARGET_FRAME_RATE_FACTOR;

/// Immutable timing snapshot for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Frame delta normalized to a 60 fps baseline (1.0 at 60 fps, 2.0 at
    /// 30 fps). Multiply per-tick quantities by this.
    pub delta: f32,
    /// Raw frame duration in milliseconds.
    pub frame_ms: f32,
    /// Instantaneous frames per second.
    pub fps: f32,
    /// Exponentially smoothed frames per second.
    pub fps_smoothed: f32,
}

/// Tracks frame-to-frame timing from caller-supplied timestamps.
///
/// `update` takes the current time in milliseconds (monotonic, fractional
/// values welcome) and derives the delta, instantaneous fps, and a smoothed
/// fps. A zero-length frame reports infinite fps; the smoothed value
/// inherits the infinity and never recovers, so hosts that can observe
/// duplicate timestamps should filter them out before updating.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: f64,
    frame_ms: f32,
    delta: f32,
    fps: f32,
    fps_smoothed: f32,
    smoothing: f32,
}

impl FrameClock {
    pub const DEFAULT_SMOOTHING: f32 = 0.9;

    pub fn new() -> Self {
        Self::with_smoothing(Self::DEFAULT_SMOOTHING)
    }

    /// `smoothing` in `[0, 1)` weighs the previous smoothed fps; higher
    /// values react more slowly.
    pub fn with_smoothing(smoothing: f32) -> Self {
        Self {
            last_ms: 0.0,
            frame_ms: 0.0,
            delta: 0.0,
            fps: 0.0,
            fps_smoothed: 0.0,
            smoothing,
        }
    }

    /// Re-baselines the clock at `now_ms` without deriving a frame, leaving
    /// the published delta and fps untouched. The next `update` measures
    /// from here.
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = now_ms;
    }

    /// Ends the current frame at `now_ms` and returns the new delta.
    pub fn update(&mut self, now_ms: f64) -> f32 {
        let frame_ms = (now_ms - self.last_ms) as f32;
        self.last_ms = now_ms;

        self.frame_ms = frame_ms;
        self.delta = frame_ms * TARGET_FRAME_RATE_FACTOR;
        let fps = 1000.0 / frame_ms;
        self.fps_smoothed = self.fps_smoothed * self.smoothing + fps * (1.0 - self.smoothing);
        self.fps = fps;

        self.delta
    }

    pub fn delta_time(&self) -> f32 {
        self.delta
    }

    pub fn frame_time_ms(&self) -> f32 {
        self.frame_ms
    }

    pub fn frames_per_second(&self) -> f32 {
        self.fps
    }

    pub fn frames_per_second_smoothed(&self) -> f32 {
        self.fps_smoothed
    }

    pub fn sample(&self) -> FrameTime {
        FrameTime {
            delta: self.delta,
            frame_ms: self.frame_ms,
            fps: self.fps,
            fps_smoothed: self.fps_smoothed,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
