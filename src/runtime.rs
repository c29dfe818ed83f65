//! Frame driver.
//!
//! A [`Runtime`] owns the ECS world, the `fixed` and `update` schedules and
//! the [`FixedClock`]. Each call to [`Runtime::frame`]:
//!
//! 1. updates [`WorldTime`] with the raw frame delta;
//! 2. feeds the scaled delta to the clock and runs the `fixed` schedule once
//!    per planned step (no steps while the window is unfocused);
//! 3. publishes the interpolation alpha and runs `update`.
//!
//! [`Runtime::run`] repeats that, letting the [`Host`] draw after every
//! frame, until the host reports the window closing or a system raises the
//! [`ExitFlag`].
use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::clock::{FixedClock, StepPlan};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::time::{advance_tick, set_alpha, update_world_time};

/// Set by any system to stop the loop after the current frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExitFlag(pub bool);

impl ExitFlag {
    pub fn request(&mut self) {
        self.0 = true;
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

/// Platform glue driving a [`Runtime`].
pub trait Host {
    fn should_close(&mut self, world: &mut World) -> bool;

    /// Wall time since the previous frame.
    fn frame_time(&mut self, world: &mut World) -> Duration;

    /// Moves raw input and window state into the world's resources.
    fn pump_input(&mut self, world: &mut World);

    /// Draws the world as the last completed tick left it, blended by
    /// `WorldTime::alpha`.
    fn present(&mut self, world: &mut World);
}

pub struct Runtime {
    pub world: World,
    fixed: Schedule,
    update: Schedule,
    clock: FixedClock,
}

impl Runtime {
    pub fn new(mut world: World, fixed: Schedule, update: Schedule, clock: FixedClock) -> Self {
        let fixed_delta = clock.step_secs();
        match world.get_resource_mut::<WorldTime>() {
            Some(mut time) => time.fixed_delta = fixed_delta,
            None => world.insert_resource(WorldTime::default().with_fixed_delta(fixed_delta)),
        }
        world.init_resource::<ExitFlag>();
        Self {
            world,
            fixed,
            update,
            clock,
        }
    }

    /// Clock rate and catch-up bounds from the `[loop]` config section.
    pub fn from_config(world: World, fixed: Schedule, update: Schedule, config: &GameConfig) -> Self {
        let clock = FixedClock::new(config.fixed_hz)
            .with_max_steps(config.max_steps_per_frame)
            .with_max_frame_delta(config.max_frame_delta());
        Self::new(world, fixed, update, clock)
    }

    /// Builds every schedule up front so the first frame does not pay for it.
    pub fn initialize(&mut self) -> Result<(), String> {
        self.fixed
            .initialize(&mut self.world)
            .map_err(|e| format!("fixed schedule: {e}"))?;
        self.update
            .initialize(&mut self.world)
            .map_err(|e| format!("update schedule: {e}"))?;
        Ok(())
    }

    pub fn clock(&self) -> &FixedClock {
        &self.clock
    }

    pub fn should_exit(&self) -> bool {
        self.world
            .get_resource::<ExitFlag>()
            .is_some_and(ExitFlag::is_set)
    }

    /// Runs one frame that took `elapsed` of wall time.
    pub fn frame(&mut self, elapsed: Duration) -> StepPlan {
        update_world_time(&mut self.world, elapsed.as_secs_f32());

        let focused = self
            .world
            .get_resource::<InputState>()
            .is_none_or(InputState::is_focused);
        let plan = if focused {
            let scale = self.world.resource::<WorldTime>().time_scale.max(0.0);
            // Scaling through floats would perturb exact step multiples.
            let scaled = if scale == 1.0 {
                elapsed
            } else {
                elapsed.mul_f64(f64::from(scale))
            };
            self.clock.advance(scaled)
        } else {
            StepPlan {
                steps: 0,
                alpha: self.clock.alpha(),
                dropped: Duration::ZERO,
            }
        };

        if !plan.dropped.is_zero() {
            warn!(
                "Simulation fell behind, dropped {:.1} ms",
                plan.dropped.as_secs_f64() * 1000.0
            );
        }

        for _ in 0..plan.steps {
            advance_tick(&mut self.world);
            self.fixed.run(&mut self.world);
        }

        set_alpha(&mut self.world, plan.alpha);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
        plan
    }

    /// Main loop.
    pub fn run<H: Host>(&mut self, host: &mut H) {
        while !host.should_close(&mut self.world) && !self.should_exit() {
            let elapsed = host.frame_time(&mut self.world);
            host.pump_input(&mut self.world);
            self.frame(elapsed);
            host.present(&mut self.world);
        }
        info!(
            "Loop finished after {} ticks",
            self.world.resource::<WorldTime>().tick
        );
    }
}
