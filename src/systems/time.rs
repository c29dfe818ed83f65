//! Time bookkeeping.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource. Called by the runtime directly, outside any schedule.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
}

/// Count one completed fixed tick.
pub fn advance_tick(world: &mut World) {
    world.resource_mut::<WorldTime>().tick += 1;
}

/// Publish the interpolation fraction for the render pass.
pub fn set_alpha(world: &mut World, alpha: f32) {
    world.resource_mut::<WorldTime>().alpha = alpha;
}
