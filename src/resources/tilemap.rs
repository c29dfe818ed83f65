//! Layered tile grid.
//!
//! A [`TileMap`] is an ordered stack of [`TileLayer`]s sharing one size and
//! one tileset texture. Each cell holds a [`TileRef`], the source rectangle
//! of a tile inside the tileset; a zero-area reference is an empty cell.
//!
//! Layers cache their composite image on the platform side. The core only
//! tracks when that cache is stale (`needs_recompose`) and when stored
//! references must be checked against a new tileset (`needs_clip`).
//! [`TileLayer::repaint`] performs both once the tileset is loaded.
use std::fmt;

use bevy_ecs::prelude::Resource;
use log::debug;
use serde::Serialize;

use crate::resources::texturestore::TextureHandle;
use crate::spatial::{Rect, Vec2};

pub const TILE_SIZE: f32 = 16.0;
pub const MIN_MAP_SIZE: u32 = 1;
pub const MAX_MAP_SIZE: u32 = 500;

/// Source rectangle of a tile in the tileset, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TileRef(pub Rect);

impl TileRef {
    pub const EMPTY: TileRef = TileRef(Rect::new(0.0, 0.0, 0.0, 0.0));

    /// The tile at grid cell (`col`, `row`) of the tileset.
    pub fn at_cell(col: u32, row: u32) -> Self {
        TileRef(Rect::new(
            col as f32 * TILE_SIZE,
            row as f32 * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn source(&self) -> Rect {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileMapError {
    /// Requested size outside [1, 500] on either axis.
    InvalidSize { width: i64, height: i64 },
    /// The last remaining layer cannot be removed.
    LastLayer,
    LayerOutOfRange(usize),
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileMapError::InvalidSize { width, height } => write!(
                f,
                "invalid map size {width}x{height} (each side must be in {MIN_MAP_SIZE}..={MAX_MAP_SIZE})"
            ),
            TileMapError::LastLayer => write!(f, "cannot remove the last layer"),
            TileMapError::LayerOutOfRange(i) => write!(f, "layer {i} does not exist"),
        }
    }
}

impl std::error::Error for TileMapError {}

#[derive(Debug, Clone, Serialize)]
pub struct TileLayer {
    width: u32,
    height: u32,
    tiles: Vec<TileRef>,
    #[serde(skip)]
    needs_recompose: bool,
    #[serde(skip)]
    needs_clip: bool,
}

impl TileLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileRef::EMPTY; (width * height) as usize],
            needs_recompose: true,
            needs_clip: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[TileRef] {
        &self.tiles
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (self.width * y + x) as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<TileRef> {
        if x < self.width && y < self.height {
            Some(self.tiles[self.index(x, y)])
        } else {
            None
        }
    }

    /// Writes a cell; out-of-range writes are ignored. Returns whether the
    /// write happened.
    pub fn set(&mut self, x: u32, y: u32, tile: TileRef) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.index(x, y);
        self.tiles[i] = tile;
        self.needs_recompose = true;
        true
    }

    pub fn fill(&mut self, tile: TileRef) {
        self.tiles.fill(tile);
        self.needs_recompose = true;
    }

    /// Changes the grid size, keeping the cells that still fit.
    pub fn resize(&mut self, width: u32, height: u32) {
        let mut tiles = vec![TileRef::EMPTY; (width * height) as usize];
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                tiles[(width * y + x) as usize] = self.tiles[self.index(x, y)];
            }
        }
        self.width = width;
        self.height = height;
        self.tiles = tiles;
        self.needs_recompose = true;
    }

    pub fn request_recompose(&mut self) {
        self.needs_recompose = true;
    }

    pub fn request_clip(&mut self) {
        self.needs_clip = true;
        self.needs_recompose = true;
    }

    pub fn needs_recompose(&self) -> bool {
        self.needs_recompose
    }

    pub fn needs_clip(&self) -> bool {
        self.needs_clip
    }

    /// Empties every reference whose origin lies outside a tileset of the
    /// given pixel size. Returns how many cells were cleared.
    pub fn clip(&mut self, tileset_w: u32, tileset_h: u32) -> usize {
        let (w, h) = (tileset_w as f32, tileset_h as f32);
        let mut cleared = 0;
        for tile in self.tiles.iter_mut() {
            if !tile.is_empty() && (tile.0.x >= w || tile.0.y >= h) {
                *tile = TileRef::EMPTY;
                cleared += 1;
            }
        }
        self.needs_clip = false;
        cleared
    }

    /// Runs any pending clip and recompose against a loaded tileset. `draw`
    /// receives each non-empty cell with its tile. Does nothing while the
    /// tileset is not loaded. Returns whether the layer was recomposed.
    pub fn repaint<F>(&mut self, tileset: Option<(u32, u32)>, mut draw: F) -> bool
    where
        F: FnMut(u32, u32, TileRef),
    {
        let Some((tw, th)) = tileset else {
            return false;
        };
        if self.needs_clip {
            let cleared = self.clip(tw, th);
            if cleared > 0 {
                debug!("Clipped {} tiles outside {}x{} tileset", cleared, tw, th);
            }
        }
        if !self.needs_recompose {
            return false;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let tile = self.tiles[self.index(x, y)];
                if !tile.is_empty() {
                    draw(x, y, tile);
                }
            }
        }
        self.needs_recompose = false;
        true
    }
}

/// Opacity and brightness of layer `index` while `selected` is being edited:
/// layers above the selection are faded, layers below are darkened.
pub fn layer_appearance(index: usize, selected: usize) -> (f32, f32) {
    let alpha = if index <= selected { 1.0 } else { 0.33 };
    let brightness = if index < selected { 0.5 } else { 1.0 };
    (alpha, brightness)
}

#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    width: u32,
    height: u32,
    layers: Vec<TileLayer>,
    tileset: Option<TextureHandle>,
    loaded: bool,
    loaded_this_tick: bool,
}

impl TileMap {
    /// A map with `layers` empty layers (at least one).
    pub fn new(width: u32, height: u32, layers: usize) -> Self {
        let width = width.clamp(MIN_MAP_SIZE, MAX_MAP_SIZE);
        let height = height.clamp(MIN_MAP_SIZE, MAX_MAP_SIZE);
        Self {
            width,
            height,
            layers: (0..layers.max(1))
                .map(|_| TileLayer::new(width, height))
                .collect(),
            tileset: None,
            loaded: false,
            loaded_this_tick: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map extent in world pixels.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&TileLayer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut TileLayer> {
        self.layers.get_mut(index)
    }

    pub fn layers_mut(&mut self) -> impl Iterator<Item = &mut TileLayer> {
        self.layers.iter_mut()
    }

    /// Writes one cell. Out-of-range cells and layers are ignored.
    pub fn set_tile(&mut self, layer: usize, x: i64, y: i64, tile: TileRef) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        match self.layers.get_mut(layer) {
            Some(l) => l.set(x as u32, y as u32, tile),
            None => false,
        }
    }

    pub fn tile(&self, layer: usize, x: u32, y: u32) -> Option<TileRef> {
        self.layers.get(layer).and_then(|l| l.get(x, y))
    }

    pub fn resize(&mut self, width: i64, height: i64) -> Result<(), TileMapError> {
        let range = i64::from(MIN_MAP_SIZE)..=i64::from(MAX_MAP_SIZE);
        if !range.contains(&width) || !range.contains(&height) {
            return Err(TileMapError::InvalidSize { width, height });
        }
        self.width = width as u32;
        self.height = height as u32;
        for layer in self.layers.iter_mut() {
            layer.resize(self.width, self.height);
        }
        Ok(())
    }

    /// Fills every layer with `tile`.
    pub fn clear(&mut self, tile: TileRef) {
        for layer in self.layers.iter_mut() {
            layer.fill(tile);
        }
    }

    pub fn clear_layer(&mut self, index: usize, tile: TileRef) -> Result<(), TileMapError> {
        self.layers
            .get_mut(index)
            .map(|l| l.fill(tile))
            .ok_or(TileMapError::LayerOutOfRange(index))
    }

    /// Inserts an empty layer at `index` (clamped to the stack size) and
    /// returns where it landed.
    pub fn insert_layer(&mut self, index: usize) -> usize {
        let index = index.min(self.layers.len());
        self.layers
            .insert(index, TileLayer::new(self.width, self.height));
        self.force_repaint(None);
        index
    }

    pub fn remove_layer(&mut self, index: usize) -> Result<TileLayer, TileMapError> {
        if index >= self.layers.len() {
            return Err(TileMapError::LayerOutOfRange(index));
        }
        if self.layers.len() <= 1 {
            return Err(TileMapError::LastLayer);
        }
        let removed = self.layers.remove(index);
        self.force_repaint(None);
        Ok(removed)
    }

    /// Moves layer `index` one step up the stack; the top layer wraps to the
    /// bottom. Returns the layer's new index.
    pub fn shift_up(&mut self, index: usize) -> Result<usize, TileMapError> {
        let len = self.layers.len();
        if index >= len {
            return Err(TileMapError::LayerOutOfRange(index));
        }
        let next = if index + 1 < len { index + 1 } else { 0 };
        let layer = self.layers.remove(index);
        self.layers.insert(next, layer);
        self.force_repaint(None);
        Ok(next)
    }

    /// Moves layer `index` one step down; the bottom layer wraps to the top.
    pub fn shift_down(&mut self, index: usize) -> Result<usize, TileMapError> {
        let len = self.layers.len();
        if index >= len {
            return Err(TileMapError::LayerOutOfRange(index));
        }
        let next = if index > 0 { index - 1 } else { len - 1 };
        let layer = self.layers.remove(index);
        self.layers.insert(next, layer);
        self.force_repaint(None);
        Ok(next)
    }

    /// Marks one layer, or all of them with `None`, for recomposition.
    pub fn force_repaint(&mut self, layer: Option<usize>) {
        match layer {
            Some(i) => {
                if let Some(l) = self.layers.get_mut(i) {
                    l.request_recompose();
                }
            }
            None => self.layers.iter_mut().for_each(TileLayer::request_recompose),
        }
    }

    pub fn clip_tiles(&mut self) {
        self.layers.iter_mut().for_each(TileLayer::request_clip);
    }

    pub fn tileset(&self) -> Option<TextureHandle> {
        self.tileset
    }

    /// Swaps the tileset. Stored references are clipped against it and all
    /// layers recomposed once it has loaded.
    pub fn set_tileset(&mut self, handle: TextureHandle) {
        self.tileset = Some(handle);
        self.loaded = false;
        self.loaded_this_tick = false;
        self.clip_tiles();
    }

    /// Feeds the tileset's readiness for this tick. Returns true on the one
    /// tick where loading completes; all layers are then repainted.
    pub fn observe_tileset(&mut self, ready: bool) -> bool {
        self.loaded_this_tick = false;
        if !self.loaded && ready {
            self.loaded = true;
            self.loaded_this_tick = true;
            self.force_repaint(None);
        }
        self.loaded_this_tick
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn loaded_this_tick(&self) -> bool {
        self.loaded_this_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut map = TileMap::new(4, 3, 1);
        assert!(!map.set_tile(0, -1, 0, TileRef::at_cell(1, 1)));
        assert!(!map.set_tile(0, 4, 0, TileRef::at_cell(1, 1)));
        assert!(!map.set_tile(0, 0, 3, TileRef::at_cell(1, 1)));
        assert!(!map.set_tile(7, 0, 0, TileRef::at_cell(1, 1)));
        assert!(map.set_tile(0, 3, 2, TileRef::at_cell(1, 1)));
        assert_eq!(map.tile(0, 3, 2), Some(TileRef::at_cell(1, 1)));
        assert_eq!(map.layer(0).map(|l| l.tiles()[4 * 2 + 3]), Some(TileRef::at_cell(1, 1)));
    }

    #[test]
    fn resize_keeps_overlap_and_validates() {
        let mut map = TileMap::new(4, 4, 2);
        map.set_tile(1, 1, 1, TileRef::at_cell(2, 0));
        map.set_tile(1, 3, 3, TileRef::at_cell(3, 0));
        map.resize(2, 5).unwrap();
        assert_eq!((map.width(), map.height()), (2, 5));
        assert_eq!(map.tile(1, 1, 1), Some(TileRef::at_cell(2, 0)));
        assert!(map.layers().iter().all(|l| l.width() == 2 && l.height() == 5));

        assert_eq!(
            map.resize(0, 5),
            Err(TileMapError::InvalidSize { width: 0, height: 5 })
        );
        assert!(map.resize(501, 1).is_err());
        assert_eq!((map.width(), map.height()), (2, 5));
    }

    #[test]
    fn shifting_wraps_around_the_stack() {
        let mut map = TileMap::new(2, 2, 3);
        map.set_tile(2, 0, 0, TileRef::at_cell(5, 5));
        assert_eq!(map.shift_up(2), Ok(0));
        assert_eq!(map.tile(0, 0, 0), Some(TileRef::at_cell(5, 5)));
        assert_eq!(map.shift_down(0), Ok(2));
        assert_eq!(map.tile(2, 0, 0), Some(TileRef::at_cell(5, 5)));
        assert_eq!(map.shift_up(0), Ok(1));
        assert_eq!(map.shift_up(9), Err(TileMapError::LayerOutOfRange(9)));
    }

    #[test]
    fn last_layer_survives() {
        let mut map = TileMap::new(2, 2, 2);
        assert!(map.remove_layer(0).is_ok());
        assert_eq!(map.remove_layer(0).err(), Some(TileMapError::LastLayer));
        assert_eq!(map.layer_count(), 1);
        assert_eq!(TileMap::new(2, 2, 0).layer_count(), 1);
    }

    #[test]
    fn clip_clears_tiles_outside_the_tileset() {
        let mut map = TileMap::new(3, 1, 1);
        map.set_tile(0, 0, 0, TileRef::at_cell(0, 0));
        map.set_tile(0, 1, 0, TileRef::at_cell(4, 0));
        map.set_tile(0, 2, 0, TileRef::at_cell(0, 4));
        map.clip_tiles();

        let layer = map.layer_mut(0).unwrap();
        assert!(!layer.repaint(None, |_, _, _| {}));
        assert!(layer.needs_clip());

        let mut drawn = Vec::new();
        assert!(layer.repaint(Some((64, 64)), |x, y, _| drawn.push((x, y))));
        assert_eq!(drawn, vec![(0, 0)]);
        assert!(!layer.needs_clip());
        assert!(!layer.needs_recompose());
        assert!(!layer.repaint(Some((64, 64)), |_, _, _| {}));
    }

    #[test]
    fn writes_mark_only_their_layer_dirty() {
        let mut map = TileMap::new(2, 2, 2);
        for layer in map.layers_mut() {
            layer.repaint(Some((16, 16)), |_, _, _| {});
        }
        map.set_tile(1, 0, 0, TileRef::at_cell(0, 0));
        assert!(!map.layer(0).unwrap().needs_recompose());
        assert!(map.layer(1).unwrap().needs_recompose());
    }

    #[test]
    fn tileset_load_fires_once_and_repaints() {
        let mut map = TileMap::new(2, 2, 2);
        for layer in map.layers_mut() {
            layer.repaint(Some((16, 16)), |_, _, _| {});
        }
        map.set_tileset(TextureHandle::default());
        assert!(!map.observe_tileset(false));
        assert!(map.observe_tileset(true));
        assert!(map.is_loaded());
        assert!(!map.observe_tileset(true));
        assert!(map.layers().iter().all(TileLayer::needs_recompose));
    }

    #[test]
    fn appearance_fades_above_and_darkens_below() {
        assert_eq!(layer_appearance(0, 1), (1.0, 0.5));
        assert_eq!(layer_appearance(1, 1), (1.0, 1.0));
        assert_eq!(layer_appearance(2, 1), (0.33, 1.0));
    }
}
