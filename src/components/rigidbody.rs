//! Kinematic body component.
//!
//! Stores the velocity written by controllers and whether gravity applies.
//! There is no general physics integration: each controller integrates its
//! own entity.

use bevy_ecs::prelude::Component;

use crate::spatial::Vec2;

/// Velocity in world units per second plus the gravity switch.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
    /// When false, controllers skip gravity integration for this entity.
    pub gravity: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Zero velocity, affected by gravity.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity: true,
        }
    }

    pub fn without_gravity() -> Self {
        Self {
            gravity: false,
            ..Self::new()
        }
    }
}
