//! Transform history and render interpolation.
//!
//! [`snapshot_transforms`] opens every fixed tick by copying each
//! entity's current transform into `previous`. [`interpolate_transforms`]
//! runs once per frame after the ticks and blends the two by the clock's
//! alpha, so drawing lags the simulation by less than one tick.
use bevy_ecs::prelude::*;

use crate::components::transform::Transforms;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

pub fn snapshot_transforms(mut query: Query<&mut Transforms>) {
    for mut transforms in query.iter_mut() {
        transforms.snapshot();
    }
}

/// Blends by `WorldTime::alpha`. While the window is unfocused the
/// simulation is paused and entities are drawn at their current transform.
pub fn interpolate_transforms(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut query: Query<&mut Transforms>,
) {
    let focused = input.is_focused();
    for mut transforms in query.iter_mut() {
        if focused {
            transforms.interpolate(time.alpha);
        } else {
            transforms.interpolated = transforms.current;
        }
    }
}
