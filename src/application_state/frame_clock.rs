//! # Frame Timing
//!
//! Frame callbacks hand over absolute timestamps; the engine wants the time
//! since the previous frame. [`FrameClock`] does that conversion. It starts
//! from zero, so the first delta is the full timestamp of the first frame.

use web_time::Instant;

/// Turns absolute frame timestamps into per-frame deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// Timestamp of the previous frame in milliseconds
    previous_ms: f64,
}

impl FrameClock {
    /// Creates a clock whose previous frame was at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame at `time_ms` and returns the time since the previous one.
    pub fn advance(&mut self, time_ms: f64) -> f64 {
        let delta = time_ms - self.previous_ms;
        self.previous_ms = time_ms;
        delta
    }

    /// Timestamp of the most recent frame.
    pub fn previous_ms(&self) -> f64 {
        self.previous_ms
    }
}

/// Milliseconds since the clock was created, for drivers without their own timestamps.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    /// Starts counting from now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds elapsed since [`WallClock::new`].
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}
