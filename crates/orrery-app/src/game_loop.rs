//! Fixed-timestep frame loop.
//!
//! Bodies advance by a constant amount per frame tick, so ticks must arrive at
//! a fixed rate regardless of how fast the display refreshes. An accumulator
//! converts variable wall-clock frame times into whole 60 Hz ticks.

use std::time::Instant;
use tracing::warn;

/// One frame tick: 1/60 s.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time credited to the accumulator. Anything longer is
/// clamped so a stall never triggers a burst of catch-up ticks.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Measure the time since the previous call and run the ticks it pays for.
    ///
    /// `update_fn(fixed_dt, total_sim_time)` runs zero or more times, then
    /// `render_fn(alpha)` runs once with the leftover fraction of a tick.
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64), render_fn: impl FnMut(f64)) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.tick_with_frame_time(frame_time, update_fn, render_fn);
    }

    /// [`tick`](Self::tick) with an explicit frame time in seconds.
    pub fn tick_with_frame_time(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64),
    ) {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Fraction of a tick left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frame ticks run so far.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
