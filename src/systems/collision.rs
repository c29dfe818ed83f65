//! Collision systems.
//!
//! - [`sync_colliders`] moves every collider to its entity's current
//!   position.
//! - [`collision_detector`] tests every pair of colliders in both
//!   directions and triggers a [`CollisionEvent`] for each side that starts
//!   overlapping.
//! - [`collision_sweep`] forgets overlaps that ended and triggers
//!   [`CollisionEndedEvent`] for them.
//! - [`collision_observer`] logs enter events.
//!
//! Unsupported shape pairs are a programming error: they are logged and the
//! tick panics.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error};
use rustc_hash::FxHashMap;

use crate::components::collider::Collider;
use crate::components::collision::Collisions;
use crate::components::tag::Tag;
use crate::components::transform::Transforms;
use crate::events::collision::{CollisionEndedEvent, CollisionEvent};
use crate::spatial::{GeometryError, Shape, ShapeId};

fn fatal(e: GeometryError) -> ! {
    error!("Collision check failed: {}", e);
    panic!("{}", e);
}

pub fn sync_colliders(mut query: Query<(&Transforms, &mut Collider)>) {
    for (transforms, mut collider) in query.iter_mut() {
        collider.sync(transforms.current.position);
    }
}

pub fn collision_detector(
    mut commands: Commands,
    mut query: Query<(Entity, &Collider, &mut Collisions)>,
) {
    let mut started: Vec<(Entity, Entity)> = Vec::new();

    let mut combos = query.iter_combinations_mut();
    while let Some([(entity_a, collider_a, mut set_a), (entity_b, collider_b, mut set_b)]) =
        combos.fetch_next()
    {
        let a_new = set_a
            .check(&collider_a.shape, &collider_b.shape)
            .unwrap_or_else(|e| fatal(e));
        let b_new = set_b
            .check(&collider_b.shape, &collider_a.shape)
            .unwrap_or_else(|e| fatal(e));
        if a_new {
            started.push((entity_a, entity_b));
        }
        if b_new {
            started.push((entity_b, entity_a));
        }
    }

    for (a, b) in started {
        commands.trigger(CollisionEvent { a, b });
    }
}

pub fn collision_sweep(
    mut commands: Commands,
    mut sets: Query<(Entity, &Collider, &mut Collisions)>,
    shapes: Query<(Entity, &Collider)>,
) {
    let lookup: FxHashMap<ShapeId, (Entity, Shape)> = shapes
        .iter()
        .map(|(entity, collider)| (collider.shape.id(), (entity, collider.shape)))
        .collect();

    for (entity, collider, mut set) in sets.iter_mut() {
        if set.is_empty() {
            continue;
        }
        let removed = set
            .sweep(&collider.shape, |id| lookup.get(&id).map(|(_, shape)| *shape))
            .unwrap_or_else(|e| fatal(e));
        for id in removed {
            if let Some((other, _)) = lookup.get(&id) {
                commands.trigger(CollisionEndedEvent {
                    a: entity,
                    b: *other,
                });
            }
        }
    }
}

/// Logs each collision start with the entities' tags when they have one.
pub fn collision_observer(trigger: On<CollisionEvent>, tags: Query<&Tag>) {
    let event = trigger.event();
    let name = |e: Entity| {
        tags.get(e)
            .map(|t| t.name().to_string())
            .unwrap_or_else(|_| format!("{:?}", e))
    };
    debug!("{} touched {}", name(event.a), name(event.b));
}
