//! Debug entity inspector.
//!
//! Active only while [`DebugMode`](crate::resources::debugmode::DebugMode)
//! exists (the runtime gates these systems with `run_if`).
//!
//! - [`inspector_hover`] (frame schedule) marks the entity whose collider
//!   contains the cursor.
//! - [`inspector_select`] (fixed schedule) inspects it on a left click.
//! - [`inspector_actions`] (fixed schedule) turns G and right clicks into
//!   actions on the inspected entity.
//! - [`toggle_gravity_observer`] and [`teleport_observer`] apply them.
//! - [`inspect`] reads the values the overlay shows.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;
use serde::Serialize;

use crate::components::character::{CharacterController, CharacterState};
use crate::components::collider::Collider;
use crate::components::rigidbody::RigidBody;
use crate::components::tag::Tag;
use crate::components::transform::Transforms;
use crate::events::inspector::{TeleportEvent, ToggleGravityEvent};
use crate::resources::camera::GameCamera;
use crate::resources::input::{InputState, Key};
use crate::resources::inspector::Inspector;
use crate::spatial::Vec2;

pub fn inspector_hover(
    input: Res<InputState>,
    camera: Res<GameCamera>,
    mut inspector: ResMut<Inspector>,
    query: Query<(Entity, &Collider)>,
) {
    let cursor = camera.0.to_world(input.pointer());
    let hovered = query
        .iter()
        .find(|(_, collider)| collider.bounds().contains_point(cursor))
        .map(|(entity, _)| entity);
    if inspector.hovered != hovered {
        inspector.hovered = hovered;
    }
}

pub fn inspector_select(input: Res<InputState>, mut inspector: ResMut<Inspector>) {
    if !input.is_new_press(Key::Lmb) {
        return;
    }
    if let Some(entity) = inspector.hovered {
        if inspector.inspected != Some(entity) {
            info!("Inspecting {:?}", entity);
        }
        inspector.inspected = Some(entity);
    }
}

/// G flips gravity of the inspected entity; a right click moves it so its
/// top-left corner sits under the cursor.
pub fn inspector_actions(
    input: Res<InputState>,
    camera: Res<GameCamera>,
    inspector: Res<Inspector>,
    mut commands: Commands,
) {
    let Some(entity) = inspector.inspected else {
        return;
    };
    if input.is_new_press(Key::G) {
        commands.trigger(ToggleGravityEvent { entity });
    }
    if input.is_new_press(Key::Rmb) {
        let position = camera.0.to_world(input.pointer());
        commands.trigger(TeleportEvent { entity, position });
    }
}

pub fn toggle_gravity_observer(trigger: On<ToggleGravityEvent>, mut bodies: Query<&mut RigidBody>) {
    let entity = trigger.event().entity;
    if let Ok(mut body) = bodies.get_mut(entity) {
        body.gravity = !body.gravity;
        info!("Gravity for {:?}: {}", entity, body.gravity);
    }
}

pub fn teleport_observer(
    trigger: On<TeleportEvent>,
    mut query: Query<(&mut Transforms, Option<&mut Collider>)>,
) {
    let TeleportEvent { entity, position } = *trigger.event();
    if let Ok((mut transforms, collider)) = query.get_mut(entity) {
        transforms.teleport(position);
        if let Some(mut collider) = collider {
            collider.sync(position);
        }
    }
}

/// Snapshot of an entity for the inspector overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectorView {
    pub tag: Option<String>,
    pub state: Option<CharacterState>,
    pub position: Option<Vec2>,
    pub velocity: Option<Vec2>,
    pub gravity: Option<bool>,
}

pub fn inspect(world: &World, entity: Entity) -> Option<InspectorView> {
    world.get_entity(entity).ok()?;
    let body = world.get::<RigidBody>(entity);
    Some(InspectorView {
        tag: world.get::<Tag>(entity).map(|t| t.name().to_string()),
        state: world.get::<CharacterController>(entity).map(|c| c.state),
        position: world.get::<Transforms>(entity).map(Transforms::position),
        velocity: body.map(|b| b.velocity),
        gravity: body.map(|b| b.gravity),
    })
}
