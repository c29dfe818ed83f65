//! Tile range selection and stamp painting.
//!
//! A selection is a pair of grid-aligned corner rectangles in tileset
//! pixels. Committing it copies the covered tiles into a dense `max × max`
//! stamp, row-major and anchored at (0, 0), with every unused cell empty.
//!
//! Painting repeats the stamp across the map. A painted cell `c` always
//! receives `stamp[(c - anchor) mod n]`, where `anchor` is the cell where
//! the stroke began, so strokes in any direction stay in phase.
use crate::resources::tilemap::{TILE_SIZE, TileMap, TileRef};
use crate::spatial::{Rect, Vec2};

pub const DEFAULT_MAX_STAMP: u32 = 16;

/// Grid cell containing a world position.
pub fn grid_cell(world: Vec2) -> (i64, i64) {
    (
        (world.x / TILE_SIZE).floor() as i64,
        (world.y / TILE_SIZE).floor() as i64,
    )
}

/// World rectangle of one grid cell.
pub fn cell_rect(cell: (i64, i64)) -> Rect {
    Rect::new(
        cell.0 as f32 * TILE_SIZE,
        cell.1 as f32 * TILE_SIZE,
        TILE_SIZE,
        TILE_SIZE,
    )
}

fn clamp_to_tileset(mut corner: Rect, tileset: Vec2) -> Rect {
    corner.x = corner.x.min(tileset.x - TILE_SIZE).max(0.0);
    corner.y = corner.y.min(tileset.y - TILE_SIZE).max(0.0);
    corner
}

#[derive(Debug, Clone)]
pub struct TileSelection {
    start: Rect,
    end: Rect,
    max: u32,
    stamp: Vec<TileRef>,
}

impl TileSelection {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        let mut selection = Self {
            start: Rect::default(),
            end: Rect::default(),
            max,
            stamp: vec![TileRef::EMPTY; (max * max) as usize],
        };
        selection.reset();
        selection
    }

    /// Back to the single top-left tile.
    pub fn reset(&mut self) {
        self.clear_stamp();
        self.start = Rect::new(0.0, 0.0, TILE_SIZE, TILE_SIZE);
        self.end = self.start;
        self.stamp[0] = TileRef::at_cell(0, 0);
    }

    fn clear_stamp(&mut self) {
        self.stamp.fill(TileRef::EMPTY);
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn start(&self) -> Rect {
        self.start
    }

    pub fn end(&self) -> Rect {
        self.end
    }

    /// Starts a new range at the tileset cell `corner`, pulled back inside a
    /// tileset of `tileset` pixels.
    pub fn begin(&mut self, corner: Rect, tileset: Vec2) {
        let corner = clamp_to_tileset(corner, tileset);
        self.start = corner;
        self.end = corner;
    }

    /// Moves the end corner to `corner`. The range may extend at most `max`
    /// tiles from the start in either direction and never leaves a tileset
    /// of `tileset` pixels.
    pub fn drag_to(&mut self, corner: Rect, tileset: Vec2) {
        let reach_back = (self.max - 1) as f32 * TILE_SIZE;
        let reach = self.max as f32 * TILE_SIZE;
        let mut end = corner;
        end.x = end.x.max(self.start.x - reach_back).min(self.start.x + reach);
        end.y = end.y.max(self.start.y - reach_back).min(self.start.y + reach);
        self.end = clamp_to_tileset(end, tileset);
    }

    /// Normalised range covered by the two corners, at least one tile and
    /// at most `max` tiles on each side.
    pub fn union(&self) -> Rect {
        let mut union = self.start.union(&self.end);
        let limit = self.max as f32 * TILE_SIZE;
        union.w = union.w.clamp(TILE_SIZE, limit);
        union.h = union.h.clamp(TILE_SIZE, limit);
        union
    }

    /// Stamp dimensions in tiles.
    pub fn size(&self) -> (u32, u32) {
        let union = self.union();
        (
            (union.w / TILE_SIZE) as u32,
            (union.h / TILE_SIZE) as u32,
        )
    }

    /// Copies the covered tiles into the stamp.
    pub fn commit(&mut self) {
        self.clear_stamp();
        let union = self.union();
        let (nx, ny) = self.size();
        for y in 0..ny {
            for x in 0..nx {
                self.stamp[(self.max * y + x) as usize] = TileRef(Rect::new(
                    union.x + x as f32 * TILE_SIZE,
                    union.y + y as f32 * TILE_SIZE,
                    TILE_SIZE,
                    TILE_SIZE,
                ));
            }
        }
    }

    pub fn tile(&self, x: u32, y: u32) -> TileRef {
        if x >= self.max || y >= self.max {
            return TileRef::EMPTY;
        }
        self.stamp[(self.max * y + x) as usize]
    }

    /// Writes one full copy of the stamp with its top-left at `cell`, phased
    /// relative to `anchor`.
    pub fn stamp_at(&self, map: &mut TileMap, layer: usize, anchor: (i64, i64), cell: (i64, i64)) {
        let (nx, ny) = self.size();
        let (nx, ny) = (i64::from(nx), i64::from(ny));
        let ox = (cell.0 - anchor.0).rem_euclid(nx);
        let oy = (cell.1 - anchor.1).rem_euclid(ny);
        for y in 0..ny {
            for x in 0..nx {
                let src = self.tile(((x + ox) % nx) as u32, ((y + oy) % ny) as u32);
                map.set_tile(layer, cell.0 + x, cell.1 + y, src);
            }
        }
    }
}

impl Default for TileSelection {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STAMP)
    }
}
