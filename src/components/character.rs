//! Player character state machine data.
//!
//! [`CharacterController`] holds the current [`CharacterState`], the jump
//! tuning and the per-tick flags. The transition logic itself lives in
//! [`crate::systems::character`]; the pure parts (horizontal integration,
//! jump cut factor, gravity step) are methods here so they can be tested
//! without a world.
use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::spatial::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharacterState {
    Idle,
    Look,
    Walk,
    StartJump,
    Ascend,
    InAir,
    Descend,
    Land,
}

impl CharacterState {
    pub const ALL: [CharacterState; 8] = [
        CharacterState::Idle,
        CharacterState::Look,
        CharacterState::Walk,
        CharacterState::StartJump,
        CharacterState::Ascend,
        CharacterState::InAir,
        CharacterState::Descend,
        CharacterState::Land,
    ];

    /// States in which reaching the floor counts as a landing.
    pub fn is_airborne(self) -> bool {
        match self {
            CharacterState::StartJump
            | CharacterState::Ascend
            | CharacterState::InAir
            | CharacterState::Descend => true,
            CharacterState::Idle
            | CharacterState::Look
            | CharacterState::Walk
            | CharacterState::Land => false,
        }
    }

    /// States from which a new jump press starts a jump.
    pub fn can_jump(self) -> bool {
        match self {
            CharacterState::Idle
            | CharacterState::Look
            | CharacterState::Walk
            | CharacterState::Land => true,
            CharacterState::StartJump
            | CharacterState::Ascend
            | CharacterState::InAir
            | CharacterState::Descend => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterState::Idle => "idle",
            CharacterState::Look => "look",
            CharacterState::Walk => "walk",
            CharacterState::StartJump => "startJump",
            CharacterState::Ascend => "ascend",
            CharacterState::InAir => "inAir",
            CharacterState::Descend => "descend",
            CharacterState::Land => "land",
        }
    }
}

/// Hand-tuned movement constants. Units are pixels and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterTuning {
    pub max_velocity: Vec2,
    pub acceleration: f32,
    pub deceleration: f32,
    pub gravity: f32,
    pub jump_power: f32,
    /// |vy| band around zero treated as the jump apex.
    pub apex_threshold: f32,
    pub apex_gravity_factor: f32,
    pub fall_gravity_factor: f32,
    pub slow_descend_factor: f32,
    pub max_fall_speed: f32,
    /// Seconds of idling before the look animation plays.
    pub look_delay: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        let jump_power = 220.0;
        Self {
            max_velocity: Vec2::new(120.0, 1200.0),
            acceleration: 1200.0,
            deceleration: 400.0,
            gravity: 600.0,
            jump_power,
            apex_threshold: jump_power * 0.33,
            apex_gravity_factor: 0.66,
            fall_gravity_factor: 0.66,
            slow_descend_factor: 0.8,
            max_fall_speed: 220.0,
            look_delay: 4.0,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct CharacterController {
    pub state: CharacterState,
    pub tuning: CharacterTuning,
    /// Facing left when true.
    pub flip_h: bool,
    pub gravity_factor: f32,
    pub jumped_this_tick: bool,
    /// Set when the floor is reached mid-air; applied on the next tick.
    pub landed: bool,
    pub idle_time: f32,
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new(CharacterTuning::default())
    }
}

impl CharacterController {
    pub fn new(tuning: CharacterTuning) -> Self {
        Self {
            state: CharacterState::Idle,
            tuning,
            flip_h: false,
            gravity_factor: 1.0,
            jumped_this_tick: false,
            landed: false,
            idle_time: 0.0,
        }
    }

    /// Accelerates `vx` toward `dir` (−1, 0 or 1). With no direction it
    /// decelerates toward zero and snaps to exactly zero instead of crossing
    /// it. The result is clamped to the maximum horizontal speed.
    pub fn integrate_horizontal(&self, vx: f32, dir: f32, dt: f32) -> f32 {
        let t = &self.tuning;
        let mut vx = vx;
        if dir != 0.0 {
            vx += dir * t.acceleration * dt;
        } else {
            let before = sign(vx);
            vx -= before * t.deceleration * dt;
            if sign(vx) != before {
                vx = 0.0;
            }
        }
        vx.clamp(-t.max_velocity.x, t.max_velocity.x)
    }

    /// Damping applied to upward velocity when the jump key is released.
    pub fn jump_cut_factor(&self, vy: f32) -> f32 {
        (1.0 - (vy / self.tuning.jump_power).abs() + 0.33).clamp(0.5, 0.8)
    }

    /// One gravity step on `vy` using the current gravity factor.
    pub fn apply_gravity(&self, vy: f32, dt: f32) -> f32 {
        let t = &self.tuning;
        let factor = self.gravity_factor;
        (vy + t.gravity * factor * dt).clamp(
            -t.max_velocity.y,
            t.max_fall_speed * factor * t.fall_gravity_factor,
        )
    }

    pub fn near_apex(&self, vy: f32) -> bool {
        vy.abs() < self.tuning.apex_threshold
    }

    pub fn past_apex(&self, vy: f32) -> bool {
        vy.abs() > self.tuning.apex_threshold
    }
}

/// Sign with zero mapped to zero.
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
