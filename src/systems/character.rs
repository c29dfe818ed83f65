//! Character controller.
//!
//! Runs once per fixed tick for every entity with a [`CharacterController`]
//! whose animations exist. Order within a tick:
//!
//! 1. state handling: horizontal movement, jump start/cut, gravity shaping
//!    and state transitions, with the current state's animation playing;
//! 2. facing from the sign of `vx`, then animation advance;
//! 3. horizontal clamp to the level;
//! 4. gravity integration (a pending landing switches to `Land` first);
//! 5. vertical clamp to floor and ceiling, then landing detection.
//!
//! Animations are built by [`build_character_animations`] once the sprite
//! sheet has loaded; until then the controller does not run.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::{Animator, FrameSet};
use crate::components::character::{CharacterController, CharacterState};
use crate::components::collider::Collider;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::transform::Transforms;
use crate::resources::input::{InputState, Key};
use crate::resources::level::LevelBounds;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;

const CELL: f32 = 32.0;

/// Frame sets of the 32×32 character sheet.
pub fn character_animations() -> Animator<CharacterState> {
    Animator::new(CharacterState::Idle)
        .with(CharacterState::Idle, FrameSet::from_strip(0.15, 0, 0, CELL, CELL, 5))
        .with(
            CharacterState::Look,
            FrameSet::from_strip(0.15, 0, 1, CELL, CELL, 14).once(),
        )
        .with(
            CharacterState::Walk,
            FrameSet::from_strip(0.075, 0, 2, CELL, CELL, 8).with_first_frame(1),
        )
        .with(
            CharacterState::StartJump,
            FrameSet::from_strip(0.033, 0, 3, CELL, CELL, 3).once(),
        )
        .with(CharacterState::Ascend, FrameSet::from_strip(0.1, 3, 3, CELL, CELL, 1))
        .with(CharacterState::InAir, FrameSet::from_strip(0.1, 4, 3, CELL, CELL, 1))
        .with(CharacterState::Descend, FrameSet::from_strip(0.05, 5, 3, CELL, CELL, 1))
        .with(
            CharacterState::Land,
            FrameSet::from_strip(0.066, 6, 3, CELL, CELL, 5).once(),
        )
}

/// Gives characters their animations once their sprite sheet is ready.
pub fn build_character_animations(
    mut commands: Commands,
    textures: Res<TextureStore>,
    mut query: Query<
        (Entity, &Sprite, &mut CharacterController),
        Without<Animator<CharacterState>>,
    >,
) {
    for (entity, sprite, mut controller) in query.iter_mut() {
        if !textures.is_ready(sprite.texture) {
            continue;
        }
        controller.state = CharacterState::Idle;
        commands.entity(entity).insert(character_animations());
        debug!("Character animations built for {:?}", entity);
    }
}

fn move_horizontally(
    controller: &CharacterController,
    transforms: &mut Transforms,
    body: &mut RigidBody,
    input: &InputState,
    dt: f32,
) {
    let mut dir = 0.0;
    if input.is_held(Key::Left) {
        dir -= 1.0;
    }
    if input.is_held(Key::Right) {
        dir += 1.0;
    }
    body.velocity.x = controller.integrate_horizontal(body.velocity.x, dir, dt);
    transforms.current.position.x += body.velocity.x * dt;
}

fn initiate_jump(controller: &mut CharacterController, body: &mut RigidBody, input: &InputState) {
    if input.is_new_press(Key::Space) {
        controller.state = CharacterState::StartJump;
        body.velocity.y = -controller.tuning.jump_power;
        controller.jumped_this_tick = true;
    }
}

/// Releasing jump while rising shortens the jump.
fn stop_jump(controller: &CharacterController, body: &mut RigidBody, input: &InputState) {
    if input.is_new_release(Key::Space) && body.velocity.y < 0.0 {
        body.velocity.y *= controller.jump_cut_factor(body.velocity.y);
    }
}

/// Holding jump near the apex softens gravity.
fn jump_apex(controller: &mut CharacterController, body: &RigidBody, input: &InputState) {
    if controller.near_apex(body.velocity.y) && input.is_held(Key::Space) {
        controller.gravity_factor = controller.tuning.apex_gravity_factor;
    }
}

/// Holding jump while falling slows the fall.
fn slow_descent(controller: &mut CharacterController, input: &InputState) {
    if input.is_held(Key::Space) {
        controller.gravity_factor = controller.tuning.slow_descend_factor;
    }
}

fn handle_state(
    controller: &mut CharacterController,
    transforms: &mut Transforms,
    body: &mut RigidBody,
    animator: &mut Animator<CharacterState>,
    input: &InputState,
    dt: f32,
) {
    let state = controller.state;
    animator.play(state);
    move_horizontally(controller, transforms, body, input, dt);

    match state {
        CharacterState::Idle => {
            if body.velocity.x != 0.0 {
                controller.state = CharacterState::Walk;
            }
            initiate_jump(controller, body, input);
            if controller.state == CharacterState::Idle {
                controller.idle_time += dt;
                if controller.idle_time >= controller.tuning.look_delay {
                    controller.state = CharacterState::Look;
                }
            }
        }
        CharacterState::Look => {
            if body.velocity.x != 0.0 {
                controller.state = CharacterState::Walk;
            } else if animator.is_finished() {
                controller.state = CharacterState::Idle;
                controller.idle_time = 0.0;
            }
            initiate_jump(controller, body, input);
        }
        CharacterState::Walk => {
            if body.velocity.x == 0.0 {
                controller.state = CharacterState::Idle;
            }
            initiate_jump(controller, body, input);
        }
        CharacterState::StartJump => {
            stop_jump(controller, body, input);
            if animator.is_finished() {
                controller.state = CharacterState::Ascend;
            }
        }
        CharacterState::Ascend => {
            jump_apex(controller, body, input);
            stop_jump(controller, body, input);
            if controller.near_apex(body.velocity.y) {
                controller.state = CharacterState::InAir;
            }
        }
        CharacterState::InAir => {
            jump_apex(controller, body, input);
            stop_jump(controller, body, input);
            if controller.past_apex(body.velocity.y) {
                controller.state = CharacterState::Descend;
            }
        }
        CharacterState::Descend => slow_descent(controller, input),
        CharacterState::Land => {
            if animator.is_finished() {
                controller.state = CharacterState::Idle;
            }
            initiate_jump(controller, body, input);
        }
    }

    if !matches!(controller.state, CharacterState::Idle | CharacterState::Look) {
        controller.idle_time = 0.0;
    }
}

/// Advances one character by one fixed tick of `dt` seconds.
#[allow(clippy::too_many_arguments)]
pub fn step_character(
    controller: &mut CharacterController,
    transforms: &mut Transforms,
    body: &mut RigidBody,
    animator: &mut Animator<CharacterState>,
    input: &InputState,
    level: &LevelBounds,
    body_width: f32,
    dt: f32,
) {
    let before = controller.state;
    controller.jumped_this_tick = false;

    handle_state(controller, transforms, body, animator, input, dt);

    if body.velocity.x < 0.0 {
        controller.flip_h = true;
    } else if body.velocity.x > 0.0 {
        controller.flip_h = false;
    }
    animator.advance(dt);

    let position = &mut transforms.current.position;
    position.x = position.x.clamp(0.0, level.max_x(body_width));

    if body.gravity {
        if controller.landed {
            controller.landed = false;
            controller.state = CharacterState::Land;
        }
        body.velocity.y = controller.apply_gravity(body.velocity.y, dt);
        position.y += body.velocity.y * dt;
        controller.gravity_factor = 1.0;
    }

    position.y = position.y.clamp(level.ceiling, level.floor);
    if position.y >= level.floor && controller.state.is_airborne() && !controller.jumped_this_tick
    {
        controller.landed = true;
    } else if position.y == level.floor {
        body.velocity.y = 0.0;
    }

    if before != controller.state {
        debug!("Character {} -> {}", before.name(), controller.state.name());
    }
}

/// Fixed-tick system driving every animated character.
pub fn character_controller(
    input: Res<InputState>,
    time: Res<WorldTime>,
    level: Res<LevelBounds>,
    mut query: Query<(
        &mut CharacterController,
        &mut Transforms,
        &mut RigidBody,
        &mut Animator<CharacterState>,
        Option<&Collider>,
        Option<&mut Sprite>,
    )>,
) {
    let dt = time.fixed_delta;
    for (mut controller, mut transforms, mut body, mut animator, collider, sprite) in
        query.iter_mut()
    {
        let width = collider.map(|c| c.bounds().w).unwrap_or(0.0);
        step_character(
            &mut controller,
            &mut transforms,
            &mut body,
            &mut animator,
            &input,
            &level,
            width,
            dt,
        );
        if let Some(mut sprite) = sprite {
            sprite.flip_h = controller.flip_h;
            if let Some(source) = animator.source() {
                sprite.source = source;
            }
        }
    }
}
