//! Fixed-timestep clock.
//!
//! Turns variable frame times into a whole number of fixed simulation steps
//! plus an interpolation fraction for rendering. Time is accounted in
//! [`Duration`] so that the same total elapsed time always yields the same
//! number of steps, whatever the frame pacing was.
//!
//! Catch-up is bounded: a single frame is clamped to `max_frame_delta` and
//! runs at most `max_steps` steps. Whole steps beyond that are dropped and
//! only the sub-step remainder is carried over.
use std::time::Duration;

pub const DEFAULT_FIXED_HZ: u32 = 60;
pub const DEFAULT_MAX_STEPS: u32 = 5;
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// What one frame should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    /// Fixed steps to run this frame.
    pub steps: u32,
    /// Interpolation fraction in `[0, 1)` for rendering.
    pub alpha: f32,
    /// Accumulated time thrown away by the catch-up bound.
    pub dropped: Duration,
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    step: Duration,
    accumulator: Duration,
    max_steps: u32,
    max_frame_delta: Duration,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_HZ)
    }
}

impl FixedClock {
    pub fn new(hz: u32) -> Self {
        Self {
            step: Duration::from_nanos(1_000_000_000 / u64::from(hz.max(1))),
            accumulator: Duration::ZERO,
            max_steps: DEFAULT_MAX_STEPS,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn with_max_frame_delta(mut self, max_frame_delta: Duration) -> Self {
        if !max_frame_delta.is_zero() {
            self.max_frame_delta = max_frame_delta;
        }
        self
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Accumulates `elapsed` and drains it into fixed steps.
    pub fn advance(&mut self, elapsed: Duration) -> StepPlan {
        self.accumulator += elapsed.min(self.max_frame_delta);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        let mut dropped = Duration::ZERO;
        if self.accumulator >= self.step {
            let remainder = Duration::from_nanos(
                (self.accumulator.as_nanos() % self.step.as_nanos()) as u64,
            );
            dropped = self.accumulator - remainder;
            self.accumulator = remainder;
        }

        StepPlan {
            steps,
            alpha: self.alpha(),
            dropped,
        }
    }

    /// Fraction of a step accumulated since the last completed step.
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_nanos() as f64 / self.step.as_nanos() as f64) as f32
    }
}
