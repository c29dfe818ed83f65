//! Playfield limits for the game scene.
use bevy_ecs::prelude::Resource;

/// Horizontal extent and vertical clamps of the level, in world pixels.
///
/// `floor` and `ceiling` bound an entity's top edge.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelBounds {
    pub width: f32,
    pub height: f32,
    pub floor: f32,
    pub ceiling: f32,
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 240.0,
            floor: 120.0,
            ceiling: -66.0,
        }
    }
}

impl LevelBounds {
    /// Largest x that keeps a body of `body_width` inside the level.
    pub fn max_x(&self, body_width: f32) -> f32 {
        (self.width - body_width).max(0.0)
    }
}
