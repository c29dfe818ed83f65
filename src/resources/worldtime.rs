//! Simulation time resource.
//!
//! `delta`/`elapsed` follow the frame clock, `fixed_delta` is the length of
//! one simulation tick and `tick` counts completed ticks. Systems in the fixed
//! schedule must use `fixed_delta` so their results do not depend on frame
//! pacing.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    /// Seconds per fixed tick.
    pub fixed_delta: f32,
    /// Interpolation fraction of the last frame.
    pub alpha: f32,
    pub tick: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            fixed_delta: 1.0 / 60.0,
            alpha: 0.0,
            tick: 0,
        }
    }
}

impl WorldTime {
    pub fn with_fixed_delta(mut self, fixed_delta: f32) -> Self {
        self.fixed_delta = fixed_delta;
        self
    }
}
