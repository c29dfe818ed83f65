//! Tileset readiness polling for the tile map.
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::texturestore::TextureStore;
use crate::resources::tilemap::TileMap;

/// Feeds the tileset's readiness into the map every tick. On the tick the
/// tileset becomes ready all layers are clipped against it and repainted.
pub fn tilemap_readiness(textures: Res<TextureStore>, mut map: ResMut<TileMap>) {
    let ready = map.tileset().is_some_and(|h| textures.is_ready(h));
    if map.observe_tileset(ready) {
        info!(
            "Tileset {} ready, repainting {} layers",
            map.tileset()
                .and_then(|h| textures.name(h))
                .unwrap_or("?"),
            map.layer_count()
        );
    }
}
