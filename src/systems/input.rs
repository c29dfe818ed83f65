//! Input latch systems.
//!
//! The platform layer feeds raw presses, releases and pointer moves into
//! [`InputState`] as they arrive. These systems bracket every fixed tick:
//! [`latch_input`] first, so all later systems in the tick agree on which
//! keys are new, and [`release_wheel`] last.
use bevy_ecs::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{InputState, Key};

pub fn latch_input(mut input: ResMut<InputState>) {
    input.update();
}

pub fn release_wheel(mut input: ResMut<InputState>) {
    input.after_update();
}

/// F11 toggles debug mode.
pub fn debug_toggle(input: Res<InputState>, mut commands: Commands) {
    if input.is_new_press(Key::F11) {
        commands.trigger(SwitchDebugEvent {});
    }
}
