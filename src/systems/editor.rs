//! Editor systems.
//!
//! Thin wrappers feeding world resources into [`Editor`]. UI commands are
//! applied before the mode machine so a button click and a pointer gesture
//! in the same tick see a consistent map.
use bevy_ecs::prelude::*;

use crate::editor::Editor;
use crate::events::editor::EditorBridge;
use crate::resources::input::InputState;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::spatial::Vec2;

fn tileset_size(map: &TileMap, textures: &TextureStore) -> Option<Vec2> {
    map.tileset().and_then(|h| textures.size_vec(h))
}

pub fn editor_commands(
    bridge: Res<EditorBridge>,
    textures: Res<TextureStore>,
    mut editor: ResMut<Editor>,
    mut map: ResMut<TileMap>,
) {
    for command in bridge.rx.try_iter() {
        let size = tileset_size(&map, &textures);
        editor.apply_command(command, &mut map, size);
    }
}

pub fn editor_tick(
    input: Res<InputState>,
    time: Res<WorldTime>,
    textures: Res<TextureStore>,
    mut editor: ResMut<Editor>,
    mut map: ResMut<TileMap>,
) {
    let size = tileset_size(&map, &textures);
    editor.tick(&input, &mut map, size, time.fixed_delta);
}

/// Relayouts the editor panes when the window changes size.
pub fn editor_layout(screen: Res<ScreenSize>, mut editor: ResMut<Editor>) {
    if screen.is_changed() {
        editor.resize_window(screen.w as f32, screen.h as f32);
    }
}
