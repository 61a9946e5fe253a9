//! Frame timing for the simulation loop

use std::time::{Duration, Instant};

/// Default maximum frame delta (seconds) applied after a stall
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.05;

/// Default frame rate for the headless harness
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Clamp a raw wall-clock delta into a usable simulation timestep
pub fn clamp_frame_delta(raw_secs: f32, max_delta: f32) -> f32 {
    if !raw_secs.is_finite() || raw_secs <= 0.0 {
        return 0.0;
    }
    raw_secs.min(max_delta)
}

/// Highest frame rate whose interval is still at least one microsecond
pub const MAX_FRAME_RATE: u32 = 1_000_000;

/// Per-frame interval derived from a frame rate, never shorter than 1µs
pub fn frame_interval(frame_rate: u32) -> Duration {
    Duration::from_micros((1_000_000 / frame_rate.max(1) as u64).max(1))
}

/// Produces clamped frame deltas from wall-clock instants.
/// The first frame always has zero delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Advance the clock to `now` and return the clamped delta in seconds
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        clamp_frame_delta(dt, self.max_delta)
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DELTA)
    }
}
