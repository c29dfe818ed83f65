//! Bounding shape of an entity.
//!
//! The shape lives in world space and is re-synced from the entity's
//! transform every fixed tick (plus an optional offset). Its [`ShapeId`] is
//! what other entities' collision sets remember.
//!
//! [`ShapeId`]: crate::spatial::ShapeId
use bevy_ecs::prelude::Component;

use crate::spatial::{Rect, Shape, Vec2};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: Shape,
    pub offset: Vec2,
}

impl Collider {
    /// Rectangular collider of the given size, top-left at the entity position.
    pub fn rect(width: f32, height: f32) -> Self {
        Self {
            shape: Shape::rect(Rect::new(0.0, 0.0, width, height)),
            offset: Vec2::ZERO,
        }
    }

    pub fn from_shape(shape: Shape) -> Self {
        Self {
            shape,
            offset: Vec2::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn sync(&mut self, position: Vec2) {
        self.shape.set_position(position + self.offset);
    }

    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_applies_offset_and_keeps_identity() {
        let mut c = Collider::rect(32.0, 32.0).with_offset(Vec2::new(2.0, 4.0));
        let id = c.shape.id();
        c.sync(Vec2::new(100.0, 50.0));
        assert_eq!(c.bounds(), Rect::new(102.0, 54.0, 32.0, 32.0));
        assert_eq!(c.shape.id(), id);
    }
}
