//! Offscreen surfaces.
//!
//! [`Canvas`] wraps a `RenderTexture2D` drawn with nearest-neighbour
//! filtering: the game renders at its design resolution into one and the
//! result is scaled up to the window, and each editor tile layer caches its
//! composite in one.
use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

use crate::spatial::Rect;

pub struct Canvas {
    pub texture: RenderTexture2D,
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(rl: &mut RaylibHandle, th: &RaylibThread, width: u32, height: u32) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width.max(1), height.max(1))
            .map_err(|e| format!("Failed to create render texture: {}", e))?;
        let canvas = Self {
            texture,
            width: width.max(1),
            height: height.max(1),
        };
        canvas.apply_filter();
        Ok(canvas)
    }

    fn apply_filter(&self) {
        unsafe {
            ffi::SetTextureFilter(
                self.texture.texture,
                TextureFilter::TEXTURE_FILTER_POINT as i32,
            );
        }
    }

    /// Whole texture, flipped vertically to undo OpenGL's inverted rows.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.width as f32,
            height: -(self.height as f32),
        }
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width.max(1) && self.height == height.max(1)
    }
}

pub fn to_rectangle(r: Rect) -> Rectangle {
    Rectangle {
        x: r.x,
        y: r.y,
        width: r.w,
        height: r.h,
    }
}

/// Parses `#RRGGBB`. Falls back to white on malformed input.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    match u32::from_str_radix(digits, 16) {
        Ok(v) if digits.len() == 6 => {
            Color::new((v >> 16) as u8, (v >> 8 & 0xFF) as u8, (v & 0xFF) as u8, 255)
        }
        _ => Color::WHITE,
    }
}

/// White tint carrying a layer's opacity and brightness.
pub fn layer_tint(alpha: f32, brightness: f32) -> Color {
    let level = (255.0 * brightness.clamp(0.0, 1.0)) as u8;
    Color::new(level, level, level, (255.0 * alpha.clamp(0.0, 1.0)) as u8)
}
