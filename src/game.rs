//! Scene setup.
//!
//! Two scenes share the runtime: the platformer ([`setup_game`]) and the
//! tilemap editor ([`setup_editor`]). Each inserts its resources, spawns its
//! entities and observers, and comes with a pair of schedule builders: the
//! `fixed` schedule runs once per simulation tick, the `update` schedule once
//! per frame after the ticks.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::character::CharacterController;
use crate::components::collider::Collider;
use crate::components::collision::Collisions;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::components::tag::Tag;
use crate::components::transform::Transforms;
use crate::editor::layout::Layout;
use crate::editor::{DEFAULT_TILESETS, Editor};
use crate::events::editor::EditorBridge;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::camera::{Camera, GameCamera};
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::inspector::Inspector;
use crate::resources::level::LevelBounds;
use crate::resources::screensize::{CanvasScale, ScreenSize};
use crate::resources::texturestore::TextureStore;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::spatial::{Rect, Vec2};
use crate::systems::character::{build_character_animations, character_controller};
use crate::systems::collision::{
    collision_detector, collision_observer, collision_sweep, sync_colliders,
};
use crate::systems::editor::{editor_commands, editor_layout, editor_tick};
use crate::systems::input::{debug_toggle, latch_input, release_wheel};
use crate::systems::inspector::{
    inspector_actions, inspector_hover, inspector_select, teleport_observer,
    toggle_gravity_observer,
};
use crate::systems::interpolation::{interpolate_transforms, snapshot_transforms};
use crate::systems::tilemap::tilemap_readiness;

pub const PLAYER_TAG: &str = "Fox (Player)";
pub const PLAYER_SPAWN: Vec2 = Vec2::new(180.0, 120.0);
pub const PLAYER_SHEET: &str = "fox.png";
pub const SIGN_TAG: &str = "Sign";
pub const SIGN_SHEET: &str = "sign.png";

fn insert_common(world: &mut World, config: &GameConfig) {
    let (w, h) = config.window_size();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(TextureStore::new());
    world.insert_resource(ScreenSize {
        w: w as i32,
        h: h as i32,
    });
    world.insert_resource(config.clone());
}

/// Builds the platformer scene: the player, a sign to bump into, the game
/// camera and the observers reacting to collisions and debug commands.
pub fn setup_game(world: &mut World, config: &GameConfig) {
    insert_common(world, config);

    let level = LevelBounds {
        width: config.render_width as f32,
        height: config.render_height as f32,
        ..LevelBounds::default()
    };
    world.insert_resource(level);

    let mut scale = CanvasScale::new(config.render_width, config.render_height);
    if config.scale > 0 {
        scale.set_manual(config.scale);
    }
    let screen = *world.resource::<ScreenSize>();
    let factor = scale.fit(screen) as f32;
    world.insert_resource(scale);

    let viewport = Rect::new(
        0.0,
        0.0,
        config.render_width as f32 * factor,
        config.render_height as f32 * factor,
    );
    world.insert_resource(GameCamera(Camera::new(viewport).with_scale(factor)));
    world.insert_resource(Inspector::default());

    let (fox, sign) = {
        let mut textures = world.resource_mut::<TextureStore>();
        (textures.request(PLAYER_SHEET), textures.request(SIGN_SHEET))
    };

    let player = world
        .spawn((
            Tag::new(PLAYER_TAG),
            Transforms::new(PLAYER_SPAWN),
            Sprite::new(fox, 32.0, 32.0),
            Collider::rect(32.0, 32.0),
            Collisions::default(),
            RigidBody::new(),
            CharacterController::default(),
        ))
        .id();

    let sign_position = Vec2::new(264.0, level.floor + 16.0);
    world.spawn((
        Tag::new(SIGN_TAG),
        Transforms::new(sign_position),
        Sprite::new(sign, 16.0, 16.0),
        Collider::rect(16.0, 16.0),
        Collisions::default(),
    ));

    world.spawn(Observer::new(collision_observer));
    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(toggle_gravity_observer));
    world.spawn(Observer::new(teleport_observer));
    // Observers must exist before the first tick triggers anything.
    world.flush();

    info!("Game scene ready, player {:?}", player);
}

/// Per-tick systems of the game scene.
pub fn game_fixed_schedule() -> Schedule {
    let mut fixed = Schedule::default();
    fixed.add_systems(
        (
            latch_input,
            debug_toggle,
            snapshot_transforms,
            build_character_animations,
            character_controller,
            sync_colliders,
            collision_detector,
            collision_sweep,
            inspector_select.run_if(resource_exists::<DebugMode>),
            inspector_actions.run_if(resource_exists::<DebugMode>),
            release_wheel,
        )
            .chain(),
    );
    fixed
}

/// Per-frame systems of the game scene.
pub fn game_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(interpolate_transforms);
    update.add_systems(
        inspector_hover
            .run_if(resource_exists::<DebugMode>)
            .after(interpolate_transforms),
    );
    update
}

/// Builds the editor scene: an empty map, the tileset list (the first one
/// selected) and the command bridge for toolbar widgets.
pub fn setup_editor(world: &mut World, config: &GameConfig) {
    insert_common(world, config);

    let tilesets: Vec<(String, _)> = {
        let mut textures = world.resource_mut::<TextureStore>();
        DEFAULT_TILESETS
            .iter()
            .map(|name| {
                let handle = textures.request(&format!("tilesets/{name}.png"));
                (name.to_string(), handle)
            })
            .collect()
    };

    let (w, h) = config.window_size();
    let layout = Layout::new(w as f32, h as f32, config.pane_width as f32);
    let mut map = TileMap::new(config.map_width, config.map_height, config.layers as usize);
    let mut editor = Editor::new(layout, tilesets, config.max_stamp, config.scroll_step as f32);
    editor.set_tileset(0, &mut map);

    info!(
        "Editor ready: {}x{} tiles, {} layers",
        map.width(),
        map.height(),
        map.layer_count()
    );
    world.insert_resource(map);
    world.insert_resource(editor);
    world.insert_resource(EditorBridge::new());
    world.flush();
}

/// Per-tick systems of the editor.
pub fn editor_fixed_schedule() -> Schedule {
    let mut fixed = Schedule::default();
    fixed.add_systems(
        (
            latch_input,
            editor_commands,
            editor_tick,
            tilemap_readiness,
            release_wheel,
        )
            .chain(),
    );
    fixed
}

/// Per-frame systems of the editor.
pub fn editor_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(editor_layout);
    update
}
