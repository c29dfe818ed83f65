//! Editor integration tests.
//!
//! Drive the editor scene through the runtime the way the window host does:
//! pointer moves and button presses go into [`InputState`], toolbar commands
//! into the [`EditorBridge`], and every step runs exactly one fixed tick.

use bevy_ecs::prelude::*;

use tilefox::clock::FixedClock;
use tilefox::editor::layout::Region;
use tilefox::editor::{Editor, EditorMode};
use tilefox::events::editor::{EditorBridge, EditorCommand, Pane, ZoomStep};
use tilefox::game::{editor_fixed_schedule, editor_update_schedule, setup_editor};
use tilefox::resources::gameconfig::GameConfig;
use tilefox::resources::input::{InputState, Key};
use tilefox::resources::texturestore::TextureStore;
use tilefox::resources::tilemap::{TILE_SIZE, TileMap, TileRef};
use tilefox::runtime::Runtime;
use tilefox::spatial::Vec2;

struct Session {
    runtime: Runtime,
}

impl Session {
    fn new() -> Self {
        let mut world = World::new();
        setup_editor(&mut world, &GameConfig::new());
        {
            let mut textures = world.resource_mut::<TextureStore>();
            let forest = textures.request("tilesets/forest.png");
            textures.mark_ready(forest, 256, 256);
        }
        let mut runtime = Runtime::new(
            world,
            editor_fixed_schedule(),
            editor_update_schedule(),
            FixedClock::default(),
        );
        runtime.initialize().expect("schedules build");
        let mut session = Self { runtime };
        session.tick();
        session
    }

    fn tick(&mut self) {
        let step = self.runtime.clock().step();
        assert_eq!(self.runtime.frame(step).steps, 1);
    }

    fn editor(&self) -> &Editor {
        self.runtime.world.resource::<Editor>()
    }

    fn map(&self) -> &TileMap {
        self.runtime.world.resource::<TileMap>()
    }

    fn input(&mut self) -> Mut<'_, InputState> {
        self.runtime.world.resource_mut::<InputState>()
    }

    fn point_at(&mut self, screen: Vec2) {
        self.input().move_pointer(screen);
        self.tick();
    }

    fn press(&mut self, key: Key) {
        self.input().press(key);
        self.tick();
    }

    fn release(&mut self, key: Key) {
        self.input().release(key);
        self.tick();
    }

    fn send(&mut self, command: EditorCommand) {
        let sender = self.runtime.world.resource::<EditorBridge>().sender();
        sender.send(command).expect("bridge open");
    }

    /// Window position of the centre of tileset cell (`col`, `row`).
    fn tileset_cell(&self, col: i64, row: i64) -> Vec2 {
        self.editor().tileset_camera.to_screen(cell_center(col, row))
    }

    /// Window position of the centre of map cell (`x`, `y`).
    fn map_cell(&self, x: i64, y: i64) -> Vec2 {
        self.editor().map_camera.to_screen(cell_center(x, y))
    }

    /// Selects the tileset range between two cells with one drag.
    fn select(&mut self, from: (i64, i64), to: (i64, i64)) {
        let start = self.tileset_cell(from.0, from.1);
        self.point_at(start);
        assert_eq!(self.editor().mode(), EditorMode::HoveringTileset);
        self.press(Key::Lmb);
        assert_eq!(self.editor().mode(), EditorMode::SelectingTiles);
        let end = self.tileset_cell(to.0, to.1);
        self.point_at(end);
        self.release(Key::Lmb);
    }
}

fn cell_center(x: i64, y: i64) -> Vec2 {
    Vec2::new(
        x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    )
}

#[test]
fn loaded_tileset_initializes_the_cameras() {
    let session = Session::new();
    assert!(session.editor().is_initialized());
    assert!(session.map().is_loaded());
    assert_eq!(
        session.editor().tileset_camera.position,
        Vec2::new(-4.0, -4.0)
    );
    let view = session.editor().map_camera.bounds_world();
    let center = view.center();
    assert!((center.x - session.map().center().x).abs() < 1e-3);
    assert!((center.y - session.map().center().y).abs() < 1e-3);
}

#[test]
fn entering_panes_switches_hover_modes() {
    let mut session = Session::new();
    assert_eq!(session.editor().mode(), EditorMode::HoveringToolbar);

    // Tileset pane, but off the tileset itself.
    session.point_at(Vec2::new(400.0, 500.0));
    assert_eq!(session.editor().region(), Region::TilesetPane);
    assert_eq!(session.editor().mode(), EditorMode::HoveringTilesetCanvas);

    let on_tileset = session.tileset_cell(3, 3);
    session.point_at(on_tileset);
    assert_eq!(session.editor().mode(), EditorMode::HoveringTileset);

    let on_map = session.map_cell(2, 2);
    session.point_at(on_map);
    assert_eq!(session.editor().region(), Region::MapPane);
    assert_eq!(session.editor().mode(), EditorMode::HoveringMap);

    session.point_at(Vec2::new(515.0, 300.0));
    assert_eq!(session.editor().mode(), EditorMode::HoveringSeparator);
}

#[test]
fn dragging_the_separator_resizes_the_panes() {
    let mut session = Session::new();
    session.point_at(Vec2::new(515.0, 300.0));
    session.press(Key::Lmb);
    assert_eq!(session.editor().mode(), EditorMode::MovingSeparator);

    // The drag keeps the pointer even while it crosses into the map pane.
    session.point_at(Vec2::new(615.0, 300.0));
    assert_eq!(session.editor().mode(), EditorMode::MovingSeparator);
    assert_eq!(session.editor().layout().pane_width(), 612.0);
    assert_eq!(session.editor().map_camera.viewport.x, 620.0);

    session.release(Key::Lmb);
    assert_eq!(session.editor().mode(), EditorMode::HoveringSeparator);
}

#[test]
fn selection_commits_a_stamp() {
    let mut session = Session::new();
    session.select((0, 0), (1, 1));
    assert_eq!(session.editor().selection.size(), (2, 2));
    assert_eq!(session.editor().selection.tile(0, 0), TileRef::at_cell(0, 0));
    assert_eq!(session.editor().selection.tile(1, 1), TileRef::at_cell(1, 1));
    assert!(session.editor().selection.tile(2, 0).is_empty());

    session.tick();
    assert_eq!(session.editor().mode(), EditorMode::HoveringTileset);
}

#[test]
fn selection_is_clamped_to_the_tileset() {
    let mut session = Session::new();
    // Dragging far past the bottom-right corner of a 16×16 tile sheet.
    let start = session.tileset_cell(14, 14);
    session.point_at(start);
    session.press(Key::Lmb);
    let beyond = session.tileset_cell(25, 25);
    session.point_at(beyond);
    session.release(Key::Lmb);

    assert_eq!(session.editor().selection.size(), (2, 2));
    assert_eq!(
        session.editor().selection.tile(1, 1),
        TileRef::at_cell(15, 15)
    );
}

#[test]
fn pressing_on_the_tileset_edge_stays_inside() {
    let mut session = Session::new();
    // Right and bottom edge pixels of the 256×256 sheet.
    for (edge, cell) in [
        (Vec2::new(256.0, 8.0), (15, 0)),
        (Vec2::new(8.0, 256.0), (0, 15)),
        (Vec2::new(256.0, 256.0), (15, 15)),
    ] {
        let at = session.editor().tileset_camera.to_screen(edge);
        session.point_at(at);
        assert_eq!(session.editor().mode(), EditorMode::HoveringTileset);
        session.press(Key::Lmb);
        assert_eq!(session.editor().mode(), EditorMode::SelectingTiles);
        session.release(Key::Lmb);

        let selection = &session.editor().selection;
        let union = selection.union();
        assert!(union.right() <= 256.0 && union.bottom() <= 256.0, "{union:?}");
        assert_eq!(selection.size(), (1, 1));
        assert_eq!(selection.tile(0, 0), TileRef::at_cell(cell.0, cell.1));
    }
}

#[test]
fn strokes_stay_in_phase_in_every_direction() {
    let mut session = Session::new();
    session.select((0, 0), (1, 1));

    let anchor = (5, 5);
    let at = session.map_cell(anchor.0, anchor.1);
    session.point_at(at);
    assert_eq!(session.editor().mode(), EditorMode::HoveringMap);
    session.press(Key::Lmb);
    assert_eq!(session.editor().mode(), EditorMode::PaintingTiles);
    assert_eq!(session.editor().paint_anchor(), anchor);

    for (x, y) in [(3, 3), (5, 5), (7, 7), (5, 5), (3, 7), (5, 5), (7, 3)] {
        let to = session.map_cell(x, y);
        session.point_at(to);
    }
    session.release(Key::Lmb);

    let map = session.map();
    for corner in [(3u32, 3u32), (7, 7), (3, 7), (7, 3), (8, 8)] {
        let tile = map.tile(0, corner.0, corner.1).expect("in map");
        assert!(!tile.is_empty(), "cell {:?} painted", corner);
    }

    let mut painted = 0;
    for y in 0..map.height() {
        for x in 0..map.width() {
            let tile = map.tile(0, x, y).expect("in map");
            if tile.is_empty() {
                continue;
            }
            painted += 1;
            let col = (i64::from(x) - anchor.0).rem_euclid(2) as u32;
            let row = (i64::from(y) - anchor.1).rem_euclid(2) as u32;
            assert_eq!(tile, TileRef::at_cell(col, row), "cell ({x}, {y})");
        }
    }
    assert!(painted >= 16);
    // Other layers are untouched.
    assert!(map.layer(1).expect("layer").tiles().iter().all(TileRef::is_empty));
}

#[test]
fn control_wheel_zooms_and_shift_wheel_cycles_layers() {
    let mut session = Session::new();
    let at = session.map_cell(2, 3);
    session.point_at(at);
    assert_eq!(session.editor().status_line(session.map(), at), "2, 3");

    let before = session.editor().map_camera.position;
    session.input().press(Key::Control);
    session.input().wheel(0.0, -1.0);
    session.tick();
    assert_eq!(session.editor().map_camera.zoom(), 2);
    session.release(Key::Control);

    // The wheel is released after a tick, so nothing scrolls afterwards.
    let zoomed = session.editor().map_camera.position;
    session.tick();
    assert_eq!(session.editor().map_camera.position, zoomed);
    assert_ne!(zoomed, before);

    session.input().press(Key::Shift);
    session.input().wheel(0.0, -1.0);
    session.tick();
    assert_eq!(session.editor().selected_layer(), 1);
    session.input().wheel(0.0, 1.0);
    session.tick();
    session.input().wheel(0.0, 1.0);
    session.tick();
    assert_eq!(session.editor().selected_layer(), 2);
    session.release(Key::Shift);

    session.press(Key::Digit1);
    assert_eq!(session.editor().selected_layer(), 0);
    session.release(Key::Digit1);
    session.press(Key::Digit9);
    assert_eq!(session.editor().selected_layer(), 0);
}

#[test]
fn status_line_covers_the_stamp_and_goes_blank_off_map() {
    let mut session = Session::new();
    session.select((4, 4), (5, 5));

    let at = session.map_cell(2, 3);
    session.point_at(at);
    assert_eq!(session.editor().status_line(session.map(), at), "2, 3 | 3, 4");

    let off = session.editor().map_camera.to_screen(Vec2::new(-30.0, 10.0));
    assert_eq!(session.editor().status_line(session.map(), off), "-, -");
}

#[test]
fn bridge_commands_edit_the_map() {
    let mut session = Session::new();
    session.send(EditorCommand::AddLayer);
    session.send(EditorCommand::SelectLayer(1));
    session.send(EditorCommand::ShiftLayerDown);
    session.send(EditorCommand::ResizeMap {
        width: 600,
        height: 10,
    });
    session.send(EditorCommand::Zoom(Pane::Map, ZoomStep::In));
    session.tick();

    assert_eq!(session.map().layer_count(), 4);
    // Layer 0 shifted down wraps to the top.
    assert_eq!(session.editor().selected_layer(), 3);
    assert_eq!((session.map().width(), session.map().height()), (40, 35));
    assert_eq!(session.editor().map_camera.zoom(), 2);

    session.send(EditorCommand::ResizeMap {
        width: 10,
        height: 12,
    });
    session.send(EditorCommand::Zoom(Pane::Map, ZoomStep::Reset));
    session.tick();
    assert_eq!((session.map().width(), session.map().height()), (10, 12));
    assert_eq!(session.editor().map_camera.zoom(), 1);
}

#[test]
fn clear_commands_empty_one_layer_or_all() {
    fn paint(session: &mut Session, cell: (i64, i64)) {
        let at = session.map_cell(cell.0, cell.1);
        session.point_at(at);
        session.press(Key::Lmb);
        session.tick();
        session.release(Key::Lmb);
    }

    let mut session = Session::new();
    paint(&mut session, (2, 2));
    session.send(EditorCommand::SelectLayer(2));
    session.tick();
    paint(&mut session, (4, 4));
    assert_eq!(session.map().tile(0, 2, 2), Some(TileRef::at_cell(0, 0)));
    assert_eq!(session.map().tile(1, 4, 4), Some(TileRef::at_cell(0, 0)));

    session.send(EditorCommand::ClearLayer);
    session.tick();
    assert_eq!(session.map().tile(1, 4, 4), Some(TileRef::EMPTY));
    assert_eq!(session.map().tile(0, 2, 2), Some(TileRef::at_cell(0, 0)));
    assert_eq!(session.map().layer_count(), 3);

    session.send(EditorCommand::ClearMap);
    session.tick();
    assert_eq!(session.map().tile(0, 2, 2), Some(TileRef::EMPTY));
    assert_eq!(session.map().layer_count(), 3);
}

#[test]
fn switching_tilesets_waits_for_the_texture() {
    let mut session = Session::new();
    session.select((0, 0), (2, 2));
    session.send(EditorCommand::SetTileset(2));
    session.tick();

    assert_eq!(session.editor().current_tileset(), 2);
    assert!(!session.map().is_loaded());
    assert!(!session.editor().is_initialized());
    assert_eq!(session.editor().selection.size(), (1, 1));

    let cave = session.editor().current_tileset_handle().expect("handle");
    session
        .runtime
        .world
        .resource_mut::<TextureStore>()
        .mark_ready(cave, 128, 128);
    session.tick();
    assert!(session.map().is_loaded());
    assert!(session.editor().is_initialized());

    // Out of range: nothing changes.
    session.send(EditorCommand::SetTileset(9));
    session.tick();
    assert_eq!(session.editor().current_tileset(), 2);
}

#[test]
fn layer_reordering_wraps_and_keeps_the_selection_valid() {
    let mut session = Session::new();
    session
        .runtime
        .world
        .resource_mut::<TileMap>()
        .set_tile(2, 0, 0, TileRef::at_cell(3, 3));

    session.send(EditorCommand::SelectLayer(3));
    session.send(EditorCommand::ShiftLayerUp);
    session.tick();
    assert_eq!(session.editor().selected_layer(), 0);
    assert_eq!(session.map().tile(0, 0, 0), Some(TileRef::at_cell(3, 3)));
    assert!(session.map().layers().iter().all(|l| l.needs_recompose()));

    session.send(EditorCommand::ShiftLayerDown);
    session.tick();
    assert_eq!(session.editor().selected_layer(), 2);
    assert_eq!(session.map().tile(2, 0, 0), Some(TileRef::at_cell(3, 3)));

    for _ in 0..5 {
        session.send(EditorCommand::RemoveLayer);
    }
    session.tick();
    assert_eq!(session.map().layer_count(), 1);
    assert_eq!(session.editor().selected_layer(), 0);

    // Out-of-range field values clamp.
    session.send(EditorCommand::SelectLayer(-4));
    session.tick();
    assert_eq!(session.editor().selected_layer(), 0);
}
