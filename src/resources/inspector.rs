//! Debug entity inspector state.
//!
//! While [`DebugMode`](crate::resources::debugmode::DebugMode) is present the
//! entity under the cursor is `hovered`, and clicking it makes it
//! `inspected`.
use bevy_ecs::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inspector {
    pub hovered: Option<Entity>,
    pub inspected: Option<Entity>,
}
