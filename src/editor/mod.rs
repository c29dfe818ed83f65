//! Tilemap editor interaction.
//!
//! [`Editor`] is a resource holding the pointer-driven mode machine and
//! everything it edits besides the map itself: the two pane cameras, the
//! tile selection and stamp, the selected layer and the tileset list. All of
//! its methods are plain functions of the latched input, so the
//! `editor_tick` system is a thin wrapper and tests can drive it directly.
//!
//! Submodules:
//! - [`layout`]: window regions and the draggable separator.
//! - [`selection`]: tile range selection and stamp painting.
//! - [`toolbar`]: toolbar buttons and the status readout.
pub mod layout;
pub mod selection;
pub mod toolbar;

use bevy_ecs::prelude::Resource;
use log::{debug, info, warn};

use crate::events::editor::{EditorCommand, Pane, ZoomStep};
use crate::resources::camera::Camera;
use crate::resources::input::{InputState, Key};
use crate::resources::texturestore::TextureHandle;
use crate::resources::tilemap::{TILE_SIZE, TileMap, TileRef};
use crate::spatial::{Rect, Vec2};
use layout::{Layout, MAX_PANE_WIDTH, MIN_PANE_WIDTH, Region};
use selection::{TileSelection, cell_rect, grid_cell};

pub const MIN_ZOOM: u32 = 1;
pub const MAX_ZOOM: u32 = 8;
pub const DEFAULT_TILESETS: [&str; 4] = ["forest", "inner", "cave", "overworld"];

/// WASD panning speed, in scroll steps per second.
const KEY_SCROLL_RATE: f32 = 3.0;
/// Where the tileset camera starts once a tileset is shown.
const TILESET_ORIGIN: Vec2 = Vec2 { x: -4.0, y: -4.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    /// Resolved at the start of the next tick to the mode of the region the
    /// pointer last entered.
    Indeterminate,
    HoveringTilesetCanvas,
    HoveringTileset,
    MovingTileset,
    HoveringMapCanvas,
    HoveringMap,
    MovingMap,
    HoveringSeparator,
    MovingSeparator,
    SelectingTiles,
    PaintingTiles,
    HoveringToolbar,
}

impl EditorMode {
    /// Modes that own the pointer until a button is released.
    pub fn is_drag(self) -> bool {
        matches!(
            self,
            EditorMode::MovingSeparator
                | EditorMode::SelectingTiles
                | EditorMode::MovingTileset
                | EditorMode::MovingMap
                | EditorMode::PaintingTiles
        )
    }
}

fn hover_mode(region: Region) -> Option<EditorMode> {
    match region {
        Region::Toolbar => Some(EditorMode::HoveringToolbar),
        Region::TilesetPane => Some(EditorMode::HoveringTilesetCanvas),
        Region::Separator => Some(EditorMode::HoveringSeparator),
        Region::MapPane => Some(EditorMode::HoveringMapCanvas),
        Region::Outside => None,
    }
}

fn starts_pan(input: &InputState) -> bool {
    (input.is_held(Key::Space) && input.is_new_press(Key::Lmb)) || input.is_new_press(Key::Mmb)
}

fn ends_pan(input: &InputState) -> bool {
    input.is_new_release(Key::Space) || input.is_new_release(Key::Mmb)
}

fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Editor {
    mode: EditorMode,
    fallback: EditorMode,
    region: Region,
    layout: Layout,
    pub map_camera: Camera,
    pub tileset_camera: Camera,
    pub selection: TileSelection,
    paint_anchor: (i64, i64),
    selected_layer: usize,
    tilesets: Vec<(String, TextureHandle)>,
    current_tileset: usize,
    initialized: bool,
    scroll_step: f32,
}

impl Editor {
    pub fn new(
        layout: Layout,
        tilesets: Vec<(String, TextureHandle)>,
        max_stamp: u32,
        scroll_step: f32,
    ) -> Self {
        Self {
            mode: EditorMode::Indeterminate,
            fallback: EditorMode::Indeterminate,
            region: Region::Outside,
            map_camera: Camera::new(layout.map_pane()).with_zoom_range(MIN_ZOOM, MAX_ZOOM),
            tileset_camera: Camera::new(layout.tileset_pane())
                .with_zoom_range(MIN_ZOOM, MAX_ZOOM),
            layout,
            selection: TileSelection::new(max_stamp),
            paint_anchor: (0, 0),
            selected_layer: 0,
            tilesets,
            current_tileset: 0,
            initialized: false,
            scroll_step,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Mode an indeterminate editor resolves to.
    pub fn fallback_mode(&self) -> EditorMode {
        self.fallback
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn selected_layer(&self) -> usize {
        self.selected_layer
    }

    pub fn paint_anchor(&self) -> (i64, i64) {
        self.paint_anchor
    }

    pub fn tilesets(&self) -> &[(String, TextureHandle)] {
        &self.tilesets
    }

    pub fn current_tileset(&self) -> usize {
        self.current_tileset
    }

    pub fn current_tileset_handle(&self) -> Option<TextureHandle> {
        self.tilesets.get(self.current_tileset).map(|(_, h)| *h)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn camera_mut(&mut self, pane: Pane) -> &mut Camera {
        match pane {
            Pane::Map => &mut self.map_camera,
            Pane::Tileset => &mut self.tileset_camera,
        }
    }

    fn sync_viewports(&mut self) {
        self.map_camera.viewport = self.layout.map_pane();
        self.tileset_camera.viewport = self.layout.tileset_pane();
    }

    /// Relayouts after the window changed size.
    pub fn resize_window(&mut self, width: f32, height: f32) {
        self.layout.resize(width, height);
        self.sync_viewports();
    }

    pub fn set_pane_width(&mut self, width: f32) {
        self.layout.set_pane_width(width);
        self.sync_viewports();
    }

    /// Runs one tick of the mode machine.
    ///
    /// `tileset` is the pixel size of the current tileset, `None` while it is
    /// still loading; tileset-pane modes do nothing until it is known.
    pub fn tick(&mut self, input: &InputState, map: &mut TileMap, tileset: Option<Vec2>, dt: f32) {
        self.track_pointer(input.pointer());

        if !self.initialized && tileset.is_some() {
            self.map_camera.center_on(map.center());
            self.tileset_camera.position = TILESET_ORIGIN;
            self.initialized = true;
        }

        if self.mode == EditorMode::Indeterminate {
            self.mode = self.fallback;
        }

        let before = self.mode;
        self.mode = match before {
            EditorMode::HoveringTilesetCanvas
            | EditorMode::HoveringTileset
            | EditorMode::MovingTileset
            | EditorMode::SelectingTiles => self.update_tileset_pane(input, tileset, dt),
            EditorMode::HoveringMapCanvas
            | EditorMode::HoveringMap
            | EditorMode::MovingMap
            | EditorMode::PaintingTiles => self.update_map_pane(input, map, dt),
            EditorMode::HoveringSeparator | EditorMode::MovingSeparator => {
                self.update_separator(input)
            }
            EditorMode::HoveringToolbar | EditorMode::Indeterminate => before,
        };
        if before != self.mode {
            debug!("Editor mode {:?} -> {:?}", before, self.mode);
        }

        self.select_layer_from_input(input, map);
        if input.is_new_press(Key::Q) {
            self.dump_layer(map);
        }
    }

    fn track_pointer(&mut self, pointer: Vec2) {
        let region = self.layout.region_at(pointer);
        if region != self.region {
            let left = self.region;
            self.region = region;
            self.pointer_left(left);
            self.pointer_entered(region);
        }
    }

    /// Pointer entered `region`. Records the region's hover mode as the
    /// fallback and switches to it unless a drag owns the pointer.
    pub fn pointer_entered(&mut self, region: Region) {
        let Some(target) = hover_mode(region) else {
            return;
        };
        self.fallback = target;
        let busy = self.mode.is_drag()
            || (region == Region::TilesetPane && self.mode == EditorMode::HoveringTileset);
        if !busy {
            self.mode = target;
        }
    }

    /// Pointer left `region`. Only the separator and the tileset pane give
    /// up hover; the map pane and toolbar keep it until another region
    /// claims the pointer.
    pub fn pointer_left(&mut self, region: Region) {
        if matches!(region, Region::Separator | Region::TilesetPane) && !self.mode.is_drag() {
            self.mode = EditorMode::Indeterminate;
        }
    }

    fn update_tileset_pane(
        &mut self,
        input: &InputState,
        tileset: Option<Vec2>,
        dt: f32,
    ) -> EditorMode {
        let Some(size) = tileset else {
            return self.mode;
        };
        let bounds = Rect::from_position_size(Vec2::ZERO, size);

        let mode = self.mode;
        match mode {
            EditorMode::HoveringTilesetCanvas | EditorMode::HoveringTileset => {
                if self.scroll_camera(Pane::Tileset, input, dt) {
                    self.tileset_camera.clamp_to(bounds, TILE_SIZE);
                }
                if self.do_zoom(Pane::Tileset, input) {
                    self.tileset_camera.clamp_to(bounds, TILE_SIZE);
                }
                let world = self.tileset_camera.to_world(input.pointer());
                let inside = bounds.contains_point(world);

                if starts_pan(input) {
                    EditorMode::MovingTileset
                } else if self.mode == EditorMode::HoveringTilesetCanvas {
                    if inside {
                        EditorMode::HoveringTileset
                    } else {
                        self.mode
                    }
                } else if !inside {
                    EditorMode::Indeterminate
                } else if !input.is_held(Key::Space) && input.is_new_press(Key::Lmb) {
                    self.selection.begin(cell_rect(grid_cell(world)), size);
                    EditorMode::SelectingTiles
                } else {
                    self.mode
                }
            }
            EditorMode::MovingTileset => {
                let still = self.move_camera(Pane::Tileset, input);
                self.tileset_camera.clamp_to(bounds, TILE_SIZE);
                if !still || ends_pan(input) {
                    EditorMode::Indeterminate
                } else {
                    self.mode
                }
            }
            EditorMode::SelectingTiles => {
                let world = self.tileset_camera.to_world(input.pointer());
                self.selection.drag_to(cell_rect(grid_cell(world)), size);
                if input.is_new_release(Key::Lmb) {
                    self.selection.commit();
                    let (w, h) = self.selection.size();
                    debug!("Selected {}x{} stamp", w, h);
                    EditorMode::Indeterminate
                } else {
                    self.mode
                }
            }
            other => other,
        }
    }

    fn update_map_pane(&mut self, input: &InputState, map: &mut TileMap, dt: f32) -> EditorMode {
        let bounds = map.bounds();

        let mode = self.mode;
        match mode {
            EditorMode::HoveringMapCanvas | EditorMode::HoveringMap => {
                if self.scroll_camera(Pane::Map, input, dt) {
                    self.map_camera.clamp_to(bounds, TILE_SIZE);
                }
                let mut mode = self.mode;
                if starts_pan(input) {
                    mode = EditorMode::MovingMap;
                } else if input.is_new_press(Key::Lmb) {
                    self.paint_anchor = grid_cell(self.map_camera.to_world(input.pointer()));
                    mode = EditorMode::PaintingTiles;
                }
                if self.do_zoom(Pane::Map, input) {
                    self.map_camera.clamp_to(bounds, TILE_SIZE);
                }
                if mode == self.mode {
                    let inside = bounds.contains_point(self.map_camera.to_world(input.pointer()));
                    mode = if inside {
                        EditorMode::HoveringMap
                    } else {
                        EditorMode::HoveringMapCanvas
                    };
                }
                mode
            }
            EditorMode::PaintingTiles => {
                if input.is_held(Key::Lmb) {
                    self.paint_stroke(map, input.pointer(), input.pointer_motion());
                }
                if input.is_new_release(Key::Lmb) {
                    EditorMode::Indeterminate
                } else {
                    self.mode
                }
            }
            EditorMode::MovingMap => {
                let still = self.move_camera(Pane::Map, input);
                self.map_camera.clamp_to(bounds, TILE_SIZE);
                if !still || ends_pan(input) {
                    EditorMode::Indeterminate
                } else {
                    self.mode
                }
            }
            other => other,
        }
    }

    fn update_separator(&mut self, input: &InputState) -> EditorMode {
        let mode = self.mode;
        match mode {
            EditorMode::HoveringSeparator if input.is_new_press(Key::Lmb) => {
                EditorMode::MovingSeparator
            }
            EditorMode::MovingSeparator => {
                let x = input.pointer().x - self.layout.tileset_pane().x;
                if (MIN_PANE_WIDTH..=MAX_PANE_WIDTH).contains(&x) {
                    let width = self.layout.pane_width() + input.pointer_motion().x;
                    self.set_pane_width(width);
                }
                if input.is_new_release(Key::Lmb) {
                    EditorMode::HoveringSeparator
                } else {
                    self.mode
                }
            }
            other => other,
        }
    }

    /// Pans a pane camera from keyboard or wheel. WASD pans continuously;
    /// the wheel only counts when no WASD key is down and moves one scroll
    /// step divided by the zoom. Control or shift suppresses both so those
    /// wheel gestures can zoom or switch layers. Returns whether the camera
    /// moved.
    pub fn scroll_camera(&mut self, pane: Pane, input: &InputState, dt: f32) -> bool {
        if input.is_held(Key::Control) || input.is_held(Key::Shift) {
            return false;
        }
        let step = self.scroll_step;
        let camera = self.camera_mut(pane);

        let key_step = step * KEY_SCROLL_RATE * dt;
        let mut delta = Vec2::ZERO;
        if input.is_held(Key::W) {
            delta.y -= key_step;
        }
        if input.is_held(Key::S) {
            delta.y += key_step;
        }
        if input.is_held(Key::A) {
            delta.x -= key_step;
        }
        if input.is_held(Key::D) {
            delta.x += key_step;
        }

        if delta == Vec2::ZERO {
            let wheel_step = step / camera.zoom() as f32;
            if input.is_held(Key::ScrollDown) {
                delta.y += wheel_step;
            }
            if input.is_held(Key::ScrollUp) {
                delta.y -= wheel_step;
            }
            if input.is_held(Key::ScrollLeft) {
                delta.x -= wheel_step;
            }
            if input.is_held(Key::ScrollRight) {
                delta.x += wheel_step;
            }
        }

        if delta == Vec2::ZERO {
            return false;
        }
        camera.pan(delta);
        true
    }

    /// Control + wheel zooms one step. Returns whether the zoom changed.
    pub fn do_zoom(&mut self, pane: Pane, input: &InputState) -> bool {
        if input.is_held(Key::Shift) || !input.is_held(Key::Control) {
            return false;
        }
        let camera = self.camera_mut(pane);
        if input.is_held(Key::ScrollUp) {
            camera.zoom_by(1)
        } else if input.is_held(Key::ScrollDown) {
            camera.zoom_by(-1)
        } else {
            false
        }
    }

    /// Drags a camera with the pointer. Returns false once neither the left
    /// nor the middle button is held.
    fn move_camera(&mut self, pane: Pane, input: &InputState) -> bool {
        if !input.is_held(Key::Lmb) && !input.is_held(Key::Mmb) {
            return false;
        }
        let motion = input.pointer_motion();
        self.camera_mut(pane).drag(motion);
        true
    }

    /// Stamps along the pointer's path this tick, one window pixel at a time
    /// per axis, so fast strokes leave no gaps.
    pub fn paint_stroke(&self, map: &mut TileMap, pointer: Vec2, motion: Vec2) {
        let dir = Vec2::new(sign(motion.x), sign(motion.y));
        let mut budget = Vec2::new(motion.x.abs(), motion.y.abs());
        let previous = pointer - Vec2::new(budget.x * dir.x, budget.y * dir.y);

        loop {
            let screen = previous + Vec2::new(budget.x * dir.x, budget.y * dir.y);
            let cell = grid_cell(self.map_camera.to_world(screen));
            self.selection
                .stamp_at(map, self.selected_layer, self.paint_anchor, cell);

            budget.x = (budget.x - 1.0).max(0.0);
            budget.y = (budget.y - 1.0).max(0.0);
            if budget.x <= 0.0 && budget.y <= 0.0 {
                break;
            }
        }
    }

    /// Shift + wheel cycles layers; digit keys pick one directly.
    fn select_layer_from_input(&mut self, input: &InputState, map: &TileMap) {
        let len = map.layer_count();
        self.selected_layer = self.selected_layer.min(len.saturating_sub(1));

        if input.is_held(Key::Shift) {
            if input.is_held(Key::ScrollDown) {
                self.selected_layer = if self.selected_layer == 0 {
                    len - 1
                } else {
                    self.selected_layer - 1
                };
            } else if input.is_held(Key::ScrollUp) {
                self.selected_layer = (self.selected_layer + 1) % len;
            }
        }
        if let Some(digit) = input.new_digit_press() {
            self.select_layer(digit.wrapping_sub(1), map);
        }
    }

    /// Selects layer `index` if it exists.
    pub fn select_layer(&mut self, index: usize, map: &TileMap) -> bool {
        if index < map.layer_count() {
            self.selected_layer = index;
            true
        } else {
            false
        }
    }

    /// Applies the 1-based layer field, clamping it into range.
    pub fn select_layer_field(&mut self, value: i64, map: &TileMap) -> usize {
        let len = map.layer_count() as i64;
        self.selected_layer = (value.clamp(1, len) - 1) as usize;
        self.selected_layer
    }

    /// Inserts a layer above the selected one and selects it.
    pub fn add_layer(&mut self, map: &mut TileMap) {
        self.selected_layer = map.insert_layer(self.selected_layer + 1);
        info!("Added layer {} of {}", self.selected_layer + 1, map.layer_count());
    }

    /// Removes the selected layer and selects the one below it.
    pub fn remove_layer(&mut self, map: &mut TileMap) {
        match map.remove_layer(self.selected_layer) {
            Ok(_) => {
                self.selected_layer = self
                    .selected_layer
                    .saturating_sub(1)
                    .min(map.layer_count() - 1);
                info!("Removed layer, {} left", map.layer_count());
            }
            Err(e) => warn!("{}", e),
        }
    }

    pub fn shift_layer_up(&mut self, map: &mut TileMap) {
        match map.shift_up(self.selected_layer) {
            Ok(index) => self.selected_layer = index,
            Err(e) => warn!("{}", e),
        }
    }

    pub fn shift_layer_down(&mut self, map: &mut TileMap) {
        match map.shift_down(self.selected_layer) {
            Ok(index) => self.selected_layer = index,
            Err(e) => warn!("{}", e),
        }
    }

    /// Switches to tileset `index` of the list. The selection resets and the
    /// cameras are placed again once the new texture is ready.
    pub fn set_tileset(&mut self, index: usize, map: &mut TileMap) -> bool {
        let Some((name, handle)) = self.tilesets.get(index) else {
            warn!("No tileset at index {}", index);
            return false;
        };
        info!("Switching tileset to {}", name);
        map.set_tileset(*handle);
        self.current_tileset = index;
        self.selection.reset();
        self.initialized = false;
        true
    }

    pub fn apply_command(&mut self, command: EditorCommand, map: &mut TileMap, tileset: Option<Vec2>) {
        debug!("Editor command {:?}", command);
        match command {
            EditorCommand::Zoom(pane, step) => {
                let camera = self.camera_mut(pane);
                match step {
                    ZoomStep::In => camera.zoom_by(1),
                    ZoomStep::Out => camera.zoom_by(-1),
                    ZoomStep::Reset => camera.set_zoom(1),
                };
                match pane {
                    Pane::Map => self.map_camera.clamp_to(map.bounds(), TILE_SIZE),
                    Pane::Tileset => {
                        if let Some(size) = tileset {
                            let bounds = Rect::from_position_size(Vec2::ZERO, size);
                            self.tileset_camera.clamp_to(bounds, TILE_SIZE);
                        }
                    }
                }
            }
            EditorCommand::SetTileset(index) => {
                self.set_tileset(index, map);
            }
            EditorCommand::AddLayer => self.add_layer(map),
            EditorCommand::RemoveLayer => self.remove_layer(map),
            EditorCommand::ShiftLayerUp => self.shift_layer_up(map),
            EditorCommand::ShiftLayerDown => self.shift_layer_down(map),
            EditorCommand::SelectLayer(value) => {
                self.select_layer_field(value, map);
            }
            EditorCommand::ResizeMap { width, height } => match map.resize(width, height) {
                Ok(()) => {
                    info!("Map resized to {}x{}", width, height);
                    self.map_camera.clamp_to(map.bounds(), TILE_SIZE);
                }
                Err(e) => warn!("{}", e),
            },
            EditorCommand::ClearLayer => {
                match map.clear_layer(self.selected_layer, TileRef::EMPTY) {
                    Ok(()) => info!("Cleared layer {}", self.selected_layer + 1),
                    Err(e) => warn!("{}", e),
                }
            }
            EditorCommand::ClearMap => {
                map.clear(TileRef::EMPTY);
                info!("Cleared {} layers", map.layer_count());
            }
            EditorCommand::DumpLayer => self.dump_layer(map),
        }
    }

    /// Logs the selected layer as JSON.
    pub fn dump_layer(&self, map: &TileMap) {
        let Some(layer) = map.layer(self.selected_layer) else {
            return;
        };
        match serde_json::to_string(layer) {
            Ok(json) => info!("Layer {}: {}", self.selected_layer, json),
            Err(e) => warn!("Could not serialize layer {}: {}", self.selected_layer, e),
        }
    }

    /// Map cells the stamp would cover at `pointer`, in world pixels.
    pub fn hover_rect(&self, pointer: Vec2) -> Rect {
        let (nx, ny) = self.selection.size();
        let cell = cell_rect(grid_cell(self.map_camera.to_world(pointer)));
        Rect::new(cell.x, cell.y, nx as f32 * TILE_SIZE, ny as f32 * TILE_SIZE)
    }

    /// Tileset cell under `pointer`, in tileset pixels.
    pub fn tileset_hover_rect(&self, pointer: Vec2) -> Rect {
        cell_rect(grid_cell(self.tileset_camera.to_world(pointer)))
    }

    /// Cursor readout: `"-, -"` off the map, `"x, y"` for a single tile and
    /// `"x, y | x2, y2"` when the stamp covers more than one.
    pub fn status_line(&self, map: &TileMap, pointer: Vec2) -> String {
        let (cx, cy) = grid_cell(self.map_camera.to_world(pointer));
        let (nx, ny) = self.selection.size();
        let (x2, y2) = (cx + i64::from(nx) - 1, cy + i64::from(ny) - 1);
        let (w, h) = (i64::from(map.width()), i64::from(map.height()));
        if x2 < 0 || y2 < 0 || cx >= w || cy >= h {
            return "-, -".to_string();
        }
        if nx > 1 || ny > 1 {
            format!("{cx}, {cy} | {x2}, {y2}")
        } else {
            format!("{cx}, {cy}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        Editor::new(Layout::new(1280.0, 720.0, 512.0), Vec::new(), 16, 64.0)
    }

    #[test]
    fn entering_a_region_sets_the_fallback() {
        let mut ed = editor();
        ed.pointer_entered(Region::MapPane);
        assert_eq!(ed.mode(), EditorMode::HoveringMapCanvas);
        assert_eq!(ed.fallback_mode(), EditorMode::HoveringMapCanvas);
    }

    #[test]
    fn drags_keep_the_pointer() {
        let mut ed = editor();
        ed.mode = EditorMode::PaintingTiles;
        ed.pointer_entered(Region::Separator);
        assert_eq!(ed.mode(), EditorMode::PaintingTiles);
        assert_eq!(ed.fallback_mode(), EditorMode::HoveringSeparator);
        ed.pointer_left(Region::Separator);
        assert_eq!(ed.mode(), EditorMode::PaintingTiles);
    }

    #[test]
    fn leaving_the_separator_goes_indeterminate() {
        let mut ed = editor();
        ed.pointer_entered(Region::Separator);
        ed.pointer_left(Region::Separator);
        assert_eq!(ed.mode(), EditorMode::Indeterminate);
        ed.pointer_left(Region::MapPane);
        assert_eq!(ed.mode(), EditorMode::Indeterminate);
    }

    #[test]
    fn layer_field_is_clamped() {
        let mut ed = editor();
        let map = TileMap::new(4, 4, 3);
        assert_eq!(ed.select_layer_field(0, &map), 0);
        assert_eq!(ed.select_layer_field(2, &map), 1);
        assert_eq!(ed.select_layer_field(99, &map), 2);
        assert!(!ed.select_layer(3, &map));
        assert_eq!(ed.selected_layer(), 2);
    }

    #[test]
    fn add_and_remove_keep_selection_valid() {
        let mut ed = editor();
        let mut map = TileMap::new(4, 4, 2);
        ed.select_layer(1, &map);
        ed.add_layer(&mut map);
        assert_eq!((ed.selected_layer(), map.layer_count()), (2, 3));
        ed.remove_layer(&mut map);
        assert_eq!((ed.selected_layer(), map.layer_count()), (1, 2));
        ed.remove_layer(&mut map);
        ed.remove_layer(&mut map);
        assert_eq!((ed.selected_layer(), map.layer_count()), (0, 1));
    }

    #[test]
    fn status_line_formats() {
        let mut ed = editor();
        let map = TileMap::new(10, 10, 1);
        let origin = ed.map_camera.viewport.position();
        assert_eq!(ed.status_line(&map, origin + Vec2::new(40.0, 20.0)), "2, 1");
        assert_eq!(ed.status_line(&map, origin + Vec2::new(-20.0, 5.0)), "-, -");

        ed.selection.begin(cell_rect((0, 0)), Vec2::new(128.0, 128.0));
        ed.selection.drag_to(cell_rect((2, 1)), Vec2::new(128.0, 128.0));
        assert_eq!(ed.status_line(&map, origin + Vec2::new(40.0, 20.0)), "2, 1 | 4, 2");
        assert_eq!(ed.status_line(&map, origin + Vec2::new(-5.0, 5.0)), "-1, 0 | 1, 1");
    }
}
