use bevy_ecs::prelude::Component;

use crate::resources::texturestore::TextureHandle;
use crate::spatial::{Rect, Vec2};

/// Sprite drawn at the entity's interpolated position.
///
/// `source` selects the region of the texture to draw; entities with an
/// [`Animator`](crate::components::animation::Animator) take the region from
/// the current frame instead.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub texture: TextureHandle,
    pub size: Vec2,
    pub source: Rect,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    pub fn new(texture: TextureHandle, width: f32, height: f32) -> Self {
        Self {
            texture,
            size: Vec2::new(width, height),
            source: Rect::new(0.0, 0.0, width, height),
            flip_h: false,
            flip_v: false,
        }
    }
}
