//! Window regions of the editor.
//!
//! The window is split into a toolbar strip along the top and, below it, the
//! tileset pane on the left, a draggable separator and the map pane filling
//! the rest.
use crate::spatial::{Rect, Vec2};

pub const TOOLBAR_HEIGHT: f32 = 24.0;
pub const SEPARATOR_WIDTH: f32 = 8.0;
pub const MIN_PANE_WIDTH: f32 = 16.0;
pub const MAX_PANE_WIDTH: f32 = 1536.0;

/// Which part of the window the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Toolbar,
    TilesetPane,
    Separator,
    MapPane,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    window: Vec2,
    pane_width: f32,
    toolbar: Rect,
    tileset_pane: Rect,
    separator: Rect,
    map_pane: Rect,
}

impl Layout {
    pub fn new(window_w: f32, window_h: f32, pane_width: f32) -> Self {
        let mut layout = Self {
            window: Vec2::new(window_w, window_h),
            pane_width: pane_width.clamp(MIN_PANE_WIDTH, MAX_PANE_WIDTH),
            toolbar: Rect::default(),
            tileset_pane: Rect::default(),
            separator: Rect::default(),
            map_pane: Rect::default(),
        };
        layout.relayout();
        layout
    }

    pub fn pane_width(&self) -> f32 {
        self.pane_width
    }

    /// Sets the tileset pane width, clamped to its limits.
    pub fn set_pane_width(&mut self, width: f32) {
        self.pane_width = width.clamp(MIN_PANE_WIDTH, MAX_PANE_WIDTH);
        self.relayout();
    }

    pub fn resize(&mut self, window_w: f32, window_h: f32) {
        self.window = Vec2::new(window_w, window_h);
        self.relayout();
    }

    fn relayout(&mut self) {
        let (w, h) = (self.window.x.max(0.0), self.window.y.max(0.0));
        let body_h = (h - TOOLBAR_HEIGHT).max(0.0);
        let pane_w = self.pane_width.min(w);
        self.toolbar = Rect::new(0.0, 0.0, w, TOOLBAR_HEIGHT.min(h));
        self.tileset_pane = Rect::new(0.0, TOOLBAR_HEIGHT, pane_w, body_h);
        self.separator = Rect::new(pane_w, TOOLBAR_HEIGHT, SEPARATOR_WIDTH, body_h);
        let map_x = pane_w + SEPARATOR_WIDTH;
        self.map_pane = Rect::new(map_x, TOOLBAR_HEIGHT, (w - map_x).max(0.0), body_h);
    }

    pub fn window(&self) -> Vec2 {
        self.window
    }

    pub fn toolbar(&self) -> Rect {
        self.toolbar
    }

    pub fn tileset_pane(&self) -> Rect {
        self.tileset_pane
    }

    pub fn separator(&self) -> Rect {
        self.separator
    }

    pub fn map_pane(&self) -> Rect {
        self.map_pane
    }

    /// Region under `point` (window pixels). Edges belong to the region on
    /// their right/bottom side.
    pub fn region_at(&self, point: Vec2) -> Region {
        let inside = |r: &Rect| {
            point.x >= r.x && point.x < r.right() && point.y >= r.y && point.y < r.bottom()
        };
        if inside(&self.toolbar) {
            Region::Toolbar
        } else if inside(&self.separator) {
            Region::Separator
        } else if inside(&self.tileset_pane) {
            Region::TilesetPane
        } else if inside(&self.map_pane) {
            Region::MapPane
        } else {
            Region::Outside
        }
    }
}
