//! Simulated frame clock for headless runs.

use web_time::{Duration, Instant};

/// Fixed-step frame clock for driving the engine without a window.
///
/// The tour binary and the wasm bridge both hand the engine explicit
/// [`Instant`]s; this clock produces them at a steady rate and keeps a
/// smoothed FPS figure for logging.
pub struct FrameTiming {
    /// Duration of one frame (zero means "as fast as possible").
    frame_duration: Duration,
    /// Timestamp of the first frame.
    origin: Instant,
    /// Timestamp of the most recent frame.
    last_frame: Instant,
    /// Frames produced so far.
    frames: u64,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a clock ticking at `target_fps` (0 = unlimited), starting at
    /// `origin`.
    #[must_use]
    pub fn new(target_fps: u32, origin: Instant) -> Self {
        let frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            frame_duration,
            origin,
            last_frame: origin,
            frames: 0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Length of one frame.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Advance by one simulated frame and return its timestamp.
    pub fn advance(&mut self) -> Instant {
        let now = self.last_frame + self.frame_duration;
        self.end_frame(now);
        now
    }

    /// Record a frame that ended at `now` (real or simulated).
    pub fn end_frame(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Time elapsed between the origin and the most recent frame.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.last_frame.saturating_duration_since(self.origin)
    }

    /// Number of frames recorded.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
