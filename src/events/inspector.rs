//! Inspector actions on a single entity.
//!
//! Debug UI triggers these; the observers in
//! [`crate::systems::inspector`] apply them.
use bevy_ecs::prelude::*;

use crate::spatial::Vec2;

/// Flip the entity's gravity flag.
#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleGravityEvent {
    pub entity: Entity,
}

/// Move the entity without interpolating from its old position.
#[derive(Event, Debug, Clone, Copy)]
pub struct TeleportEvent {
    pub entity: Entity,
    pub position: Vec2,
}
