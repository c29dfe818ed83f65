//! Draw passes.
//!
//! Exclusive passes over the world, run by the host once per frame after the
//! schedules. The game renders at its design resolution into a [`Canvas`]
//! that is then scaled into the camera viewport; the editor draws straight
//! to the window, compositing the cached tile layers.
use bevy_ecs::prelude::*;
use log::error;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::collider::Collider;
use crate::components::sprite::Sprite;
use crate::components::transform::Transforms;
use crate::editor::toolbar::{Button, status_text};
use crate::editor::{Editor, EditorMode};
use crate::platform::canvas::{Canvas, hex_color, layer_tint, to_rectangle};
use crate::resources::camera::{Camera, GameCamera};
use crate::resources::debugmode::DebugMode;
use crate::resources::input::InputState;
use crate::resources::inspector::Inspector;
use crate::resources::level::LevelBounds;
use crate::resources::texturestore::{TextureHandle, TextureStore};
use crate::resources::tilemap::{TILE_SIZE, TileMap, layer_appearance};
use crate::spatial::{Rect, Vec2};
use crate::systems::inspector::inspect;

const SKY: Color = Color::new(0x8C, 0xC8, 0xE8, 255);
const GROUND: Color = Color::new(0x4A, 0x6B, 0x3A, 255);
const BACKDROP: Color = Color::new(0x22, 0x22, 0x22, 255);
const TOOLBAR_BG: Color = Color::new(0x33, 0x33, 0x33, 255);
const SELECTION: &str = "#2288FF";
const HOVER: &str = "#DDDDDD";
const BOUNDS: &str = "#777777";

pub type Textures = FxHashMap<TextureHandle, Texture2D>;

fn outline<D: RaylibDraw>(d: &mut D, r: Rect, color: Color) {
    d.draw_rectangle_lines_ex(to_rectangle(r), 1.0, color);
}

/// Game scene: sprites at their interpolated positions, then the debug
/// overlay when [`DebugMode`] is on.
pub fn draw_game(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    world: &mut World,
    canvas: &mut Canvas,
    textures: &Textures,
) {
    let camera = world.resource::<GameCamera>().0;
    let level = *world.resource::<LevelBounds>();
    let debug = world.contains_resource::<DebugMode>();

    let sprites: Vec<(Sprite, Vec2)> = world
        .query::<(&Sprite, &Transforms)>()
        .iter(world)
        .map(|(s, t)| (s.clone(), t.interpolated.position))
        .collect();
    let colliders: Vec<(Entity, Rect)> = world
        .query::<(Entity, &Collider)>()
        .iter(world)
        .map(|(e, c)| (e, c.bounds()))
        .collect();
    let inspector = world.get_resource::<Inspector>().copied().unwrap_or_default();

    // Canvas pixels per world unit; the window scale is applied when the
    // canvas is blitted.
    let zoom = camera.zoom() as f32;
    let to_canvas = |p: Vec2| (p - camera.position) * zoom;

    {
        let mut d = rl.begin_texture_mode(thread, &mut canvas.texture);
        d.clear_background(SKY);
        let ground = to_canvas(Vec2::new(0.0, level.floor + 32.0));
        d.draw_rectangle(
            0,
            ground.y as i32,
            canvas.width as i32,
            canvas.height as i32,
            GROUND,
        );

        for (sprite, position) in &sprites {
            let Some(texture) = textures.get(&sprite.texture) else {
                continue;
            };
            let mut src = to_rectangle(sprite.source);
            if sprite.flip_h {
                src.width = -src.width;
            }
            if sprite.flip_v {
                src.height = -src.height;
            }
            let at = to_canvas(*position);
            let dest = Rectangle::new(at.x, at.y, sprite.size.x * zoom, sprite.size.y * zoom);
            d.draw_texture_pro(texture, src, dest, Vector2::zero(), 0.0, Color::WHITE);
        }

        if debug {
            for (entity, bounds) in &colliders {
                let color = if inspector.inspected == Some(*entity) {
                    Color::YELLOW
                } else if inspector.hovered == Some(*entity) {
                    Color::ORANGE
                } else {
                    Color::RED
                };
                let at = to_canvas(bounds.position());
                outline(
                    &mut d,
                    Rect::new(at.x, at.y, bounds.w * zoom, bounds.h * zoom),
                    color,
                );
            }
        }
    }

    let view = inspector.inspected.and_then(|e| inspect(world, e));
    let mut d = rl.begin_drawing(thread);
    d.clear_background(Color::BLACK);
    d.draw_texture_pro(
        &canvas.texture,
        canvas.source_rect(),
        to_rectangle(camera.viewport),
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );

    if debug {
        let fps = d.get_fps();
        d.draw_text("DEBUG (F11)", 10, 10, 10, Color::WHITE);
        d.draw_text(&format!("FPS: {}", fps), 10, 24, 10, Color::WHITE);
        if let Some(view) = view {
            let lines = [
                format!("tag: {}", view.tag.as_deref().unwrap_or("-")),
                format!(
                    "state: {}",
                    view.state.map(|s| s.name()).unwrap_or("-")
                ),
                format!(
                    "position: {}",
                    view.position
                        .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                        .unwrap_or_else(|| "-".into())
                ),
                format!(
                    "velocity: {}",
                    view.velocity
                        .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                        .unwrap_or_else(|| "-".into())
                ),
                format!(
                    "gravity: {} (G)",
                    view.gravity.map(|g| g.to_string()).unwrap_or_else(|| "-".into())
                ),
                "right click: move here".to_string(),
            ];
            for (i, line) in lines.iter().enumerate() {
                d.draw_text(line, 10, 44 + 14 * i as i32, 10, Color::YELLOW);
            }
        }
    }
}

/// Brings the per-layer caches in line with the map and recomposes every
/// stale layer from the tileset.
pub fn repaint_layers(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    world: &mut World,
    caches: &mut Vec<Canvas>,
    textures: &Textures,
) {
    let tileset = {
        let store = world.resource::<TextureStore>();
        world
            .resource::<TileMap>()
            .tileset()
            .and_then(|h| store.size(h).map(|size| (h, size)))
    };
    let Some((handle, size)) = tileset else {
        return;
    };
    let Some(texture) = textures.get(&handle) else {
        return;
    };

    let mut map = world.resource_mut::<TileMap>();
    let (pw, ph) = (
        map.width() * TILE_SIZE as u32,
        map.height() * TILE_SIZE as u32,
    );
    caches.truncate(map.layer_count());
    for i in 0..map.layer_count() {
        if caches.get(i).is_some_and(|c| c.matches(pw, ph)) {
            continue;
        }
        match Canvas::new(rl, thread, pw, ph) {
            Ok(cache) => {
                if i < caches.len() {
                    caches[i] = cache;
                } else {
                    caches.push(cache);
                }
                map.force_repaint(Some(i));
            }
            Err(e) => {
                error!("Layer cache {}: {}", i, e);
                return;
            }
        }
    }

    for (layer, cache) in map.layers_mut().zip(caches.iter_mut()) {
        if !layer.needs_recompose() {
            continue;
        }
        let mut d = rl.begin_texture_mode(thread, &mut cache.texture);
        d.clear_background(Color::BLANK);
        layer.repaint(Some(size), |x, y, tile| {
            let at = Vector2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE);
            d.draw_texture_rec(texture, to_rectangle(tile.source()), at, Color::WHITE);
        });
    }
}

fn pane_scissor<D: RaylibDraw>(d: &mut D, pane: Rect) -> RaylibScissorMode<'_, D> {
    d.begin_scissor_mode(pane.x as i32, pane.y as i32, pane.w as i32, pane.h as i32)
}

fn draw_map_pane<D: RaylibDraw>(
    d: &mut D,
    editor: &Editor,
    map: &TileMap,
    caches: &[Canvas],
    pointer: Vec2,
) {
    let camera: &Camera = &editor.map_camera;
    let mut d = pane_scissor(d, editor.layout().map_pane());
    let dest = to_rectangle(camera.to_screen_rect(map.bounds()));
    if map.is_loaded() {
        for (index, cache) in caches.iter().enumerate().take(map.layer_count()) {
            let (alpha, brightness) = layer_appearance(index, editor.selected_layer());
            d.draw_texture_pro(
                &cache.texture,
                cache.source_rect(),
                dest,
                Vector2::zero(),
                0.0,
                layer_tint(alpha, brightness),
            );
        }
    }
    outline(&mut d, camera.to_screen_rect(map.bounds()), hex_color(BOUNDS));
    if matches!(
        editor.mode(),
        EditorMode::HoveringMap | EditorMode::HoveringMapCanvas | EditorMode::PaintingTiles
    ) {
        outline(
            &mut d,
            camera.to_screen_rect(editor.hover_rect(pointer)),
            hex_color(HOVER),
        );
    }
}

fn draw_tileset_pane<D: RaylibDraw>(
    d: &mut D,
    editor: &Editor,
    texture: Option<&Texture2D>,
    pointer: Vec2,
) {
    let Some(texture) = texture else {
        return;
    };
    let camera = &editor.tileset_camera;
    let mut d = pane_scissor(d, editor.layout().tileset_pane());
    let size = Vec2::new(texture.width as f32, texture.height as f32);
    let bounds = Rect::from_position_size(Vec2::ZERO, size);
    d.draw_texture_pro(
        texture,
        to_rectangle(bounds),
        to_rectangle(camera.to_screen_rect(bounds)),
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
    outline(&mut d, camera.to_screen_rect(bounds), hex_color(BOUNDS));
    outline(
        &mut d,
        camera.to_screen_rect(editor.selection.union()),
        hex_color(SELECTION),
    );
    if editor.mode() == EditorMode::HoveringTileset {
        outline(
            &mut d,
            camera.to_screen_rect(editor.tileset_hover_rect(pointer)),
            hex_color(HOVER),
        );
    }
}

/// Editor: both panes, the separator and the toolbar.
pub fn draw_editor(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    world: &mut World,
    caches: &[Canvas],
    textures: &Textures,
    buttons: &[Button],
) {
    let editor = world.resource::<Editor>();
    let map = world.resource::<TileMap>();
    let pointer = world.resource::<InputState>().pointer();
    let tileset = editor.current_tileset_handle().and_then(|h| textures.get(&h));

    let mut d = rl.begin_drawing(thread);
    d.clear_background(BACKDROP);

    draw_tileset_pane(&mut d, editor, tileset, pointer);
    draw_map_pane(&mut d, editor, map, caches, pointer);

    let separator = editor.layout().separator();
    let separator_color = if editor.mode() == EditorMode::MovingSeparator {
        hex_color(SELECTION)
    } else {
        hex_color(BOUNDS)
    };
    d.draw_rectangle_rec(to_rectangle(separator), separator_color);

    let toolbar = editor.layout().toolbar();
    d.draw_rectangle_rec(to_rectangle(toolbar), TOOLBAR_BG);
    for button in buttons {
        let (fill, text) = if button.active {
            (hex_color(SELECTION), Color::WHITE)
        } else if button.rect.contains_point(pointer) {
            (hex_color(HOVER), Color::BLACK)
        } else {
            (hex_color(BOUNDS), Color::WHITE)
        };
        d.draw_rectangle_rec(to_rectangle(button.rect), fill);
        d.draw_text(
            &button.label,
            button.rect.x as i32 + 5,
            button.rect.y as i32 + 5,
            10,
            text,
        );
    }

    let status = status_text(editor, map, pointer);
    let width = d.measure_text(&status, 10);
    d.draw_text(
        &status,
        toolbar.right() as i32 - width - 8,
        (toolbar.y + 7.0) as i32,
        10,
        Color::WHITE,
    );
}
