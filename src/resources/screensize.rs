//! Window size and canvas scale.
//!
//! [`ScreenSize`] is the window size in pixels, refreshed by the platform
//! each frame. [`CanvasScale`] decides how many window pixels one design
//! pixel covers: a manual integer factor, or the largest integer factor
//! that still fits the design resolution in the window.

use bevy_ecs::prelude::Resource;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

pub const MIN_SCALE: u32 = 1;
pub const MAX_SCALE: u32 = 20;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CanvasScale {
    /// `None` fits the window automatically.
    pub manual: Option<u32>,
    pub design_w: u32,
    pub design_h: u32,
    value: u32,
}

impl CanvasScale {
    pub fn new(design_w: u32, design_h: u32) -> Self {
        Self {
            manual: None,
            design_w,
            design_h,
            value: 1,
        }
    }

    /// Fixes the scale; out-of-range values are clamped to [1, 20].
    pub fn set_manual(&mut self, scale: u32) {
        self.manual = Some(scale.clamp(MIN_SCALE, MAX_SCALE));
        self.value = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn set_auto(&mut self) {
        self.manual = None;
    }

    /// Recomputes the effective scale for a window size and returns it.
    pub fn fit(&mut self, screen: ScreenSize) -> u32 {
        self.value = match self.manual {
            Some(s) => s,
            None => {
                let sx = screen.w.max(0) as u32 / self.design_w.max(1);
                let sy = screen.h.max(0) as u32 / self.design_h.max(1);
                sx.min(sy).clamp(MIN_SCALE, MAX_SCALE)
            }
        };
        self.value
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}
