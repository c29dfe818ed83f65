//! World/screen mapping for a scrollable view.
//!
//! A [`Camera`] looks at the world from `position` (the world point at the
//! top-left of its viewport) with an integer zoom step. The surface it draws
//! to occupies `viewport` in window pixels and is itself scaled by the
//! canvas scale, so one world unit covers `scale * zoom` window pixels.
//!
//! The game uses one camera ([`GameCamera`]); the editor owns one per pane.
use bevy_ecs::prelude::Resource;

use crate::spatial::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    zoom: u32,
    pub min_zoom: u32,
    pub max_zoom: u32,
    /// Target surface in window pixels.
    pub viewport: Rect,
    /// Canvas scale in window pixels per surface pixel.
    pub scale: f32,
}

impl Camera {
    pub fn new(viewport: Rect) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1,
            min_zoom: 1,
            max_zoom: 1,
            viewport,
            scale: 1.0,
        }
    }

    pub fn with_zoom_range(mut self, min: u32, max: u32) -> Self {
        self.min_zoom = min.max(1);
        self.max_zoom = max.max(self.min_zoom);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Window pixels per world unit.
    pub fn pixels_per_unit(&self) -> f32 {
        self.scale * self.zoom as f32
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.viewport.position()) / self.pixels_per_unit() + self.position
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        self.viewport.position() + (world - self.position) * self.pixels_per_unit()
    }

    pub fn to_screen_rect(&self, world: Rect) -> Rect {
        let p = self.to_screen(world.position());
        let ppu = self.pixels_per_unit();
        Rect::new(p.x, p.y, world.w * ppu, world.h * ppu)
    }

    /// Visible world rectangle.
    pub fn bounds_world(&self) -> Rect {
        let ppu = self.pixels_per_unit();
        Rect::new(
            self.position.x,
            self.position.y,
            self.viewport.w / ppu,
            self.viewport.h / ppu,
        )
    }

    /// World point at the centre of the viewport.
    pub fn center_world(&self) -> Vec2 {
        self.bounds_world().center()
    }

    /// Moves the camera so `point` sits at the centre of the viewport.
    pub fn center_on(&mut self, point: Vec2) {
        let view = self.bounds_world();
        self.position = point - view.size() / 2.0;
    }

    /// Sets the zoom step, keeping the world point at the viewport centre in
    /// place. Returns whether the zoom changed.
    pub fn set_zoom(&mut self, zoom: u32) -> bool {
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if zoom == self.zoom {
            return false;
        }
        let center = self.center_world();
        self.zoom = zoom;
        self.center_on(center);
        true
    }

    pub fn zoom_by(&mut self, steps: i32) -> bool {
        let target = (self.zoom as i64 + steps as i64).max(1) as u32;
        self.set_zoom(target)
    }

    /// Pan by a world-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Drag by a window-pixel delta: the world follows the pointer.
    pub fn drag(&mut self, screen_delta: Vec2) {
        self.position -= screen_delta / self.pixels_per_unit();
    }

    /// Keeps at least `margin` world units of `content` inside the view on
    /// every side.
    pub fn clamp_to(&mut self, content: Rect, margin: f32) {
        let view = self.bounds_world();
        let min_x = content.x - view.w + margin;
        let max_x = content.right() - margin;
        let min_y = content.y - view.h + margin;
        let max_y = content.bottom() - margin;
        self.position.x = self.position.x.max(min_x).min(max_x);
        self.position.y = self.position.y.max(min_y).min(max_y);
    }
}

/// Camera following the game world.
#[derive(Resource, Debug, Clone, Copy)]
pub struct GameCamera(pub Camera);
