//! Position and scale with per-tick history for render interpolation.
//!
//! Movable entities carry a [`Transforms`] component holding three
//! [`Transform`] values: `current` (what the simulation writes),
//! `previous` (copied from `current` once at the start of every fixed tick)
//! and `interpolated` (blended between the two for drawing).
use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::spatial::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn lerp(&self, other: &Transform, t: f32) -> Transform {
        Transform {
            position: self.position.lerp(other.position, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Transforms {
    pub current: Transform,
    pub previous: Transform,
    pub interpolated: Transform,
}

impl Transforms {
    pub fn new(position: Vec2) -> Self {
        let t = Transform::at(position);
        Self {
            current: t,
            previous: t,
            interpolated: t,
        }
    }

    /// Copies `current` into `previous`. Runs once per fixed tick, before any
    /// system mutates `current`.
    pub fn snapshot(&mut self) {
        self.previous = self.current;
    }

    /// Blends `previous` toward `current` by `alpha` in `[0, 1)`.
    pub fn interpolate(&mut self, alpha: f32) {
        self.interpolated = self.previous.lerp(&self.current, alpha);
    }

    /// Moves without leaving an interpolation trail.
    pub fn teleport(&mut self, position: Vec2) {
        self.current.position = position;
        self.previous.position = position;
        self.interpolated.position = position;
    }

    pub fn position(&self) -> Vec2 {
        self.current.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_endpoints() {
        let mut t = Transforms::new(Vec2::new(0.0, 0.0));
        t.snapshot();
        t.current.position = Vec2::new(10.0, -4.0);

        t.interpolate(0.0);
        assert_eq!(t.interpolated.position, Vec2::new(0.0, 0.0));

        t.interpolate(0.5);
        assert_eq!(t.interpolated.position, Vec2::new(5.0, -2.0));

        t.interpolate(0.9999);
        assert!((t.interpolated.position.x - 10.0).abs() < 1e-2);
    }

    #[test]
    fn teleport_has_no_trail() {
        let mut t = Transforms::new(Vec2::new(1.0, 1.0));
        t.teleport(Vec2::new(50.0, 60.0));
        t.interpolate(0.3);
        assert_eq!(t.interpolated.position, Vec2::new(50.0, 60.0));
    }
}
