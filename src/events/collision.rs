//! Collision event types.
//!
//! The collision detector emits [`CollisionEvent`] on the tick an entity's
//! collider starts overlapping another one, once for each side of the pair
//! that did not already track the other. The sweep emits
//! [`CollisionEndedEvent`] when a tracked overlap stops. Observers react in a
//! decoupled manner.
use bevy_ecs::prelude::*;

/// `a` started touching `b`. Delivered once per overlap period and per
/// side, so a pair produces two events with the roles swapped.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

/// `a` stopped touching `b`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEndedEvent {
    pub a: Entity,
    pub b: Entity,
}
