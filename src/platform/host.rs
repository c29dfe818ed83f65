//! Raylib window host.
//!
//! Owns the raylib handle, the loaded GPU textures and the offscreen
//! canvases. Implements [`Host`] so the [`Runtime`](crate::runtime::Runtime)
//! can drive it: every frame it loads pending textures, refreshes the
//! window size, feeds input (and toolbar clicks) into the world and finally
//! draws the scene.
use std::path::PathBuf;
use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::editor::Editor;
use crate::editor::toolbar::{Button, clicked, toolbar_buttons};
use crate::events::editor::EditorBridge;
use crate::platform::canvas::Canvas;
use crate::platform::draw::{Textures, draw_editor, draw_game, repaint_layers};
use crate::platform::input::poll_input;
use crate::resources::camera::GameCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::screensize::{CanvasScale, ScreenSize};
use crate::resources::texturestore::{TextureHandle, TextureStore};
use crate::resources::tilemap::TileMap;
use crate::runtime::Host;
use crate::spatial::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Game,
    Editor,
}

pub struct RaylibHost {
    rl: RaylibHandle,
    thread: RaylibThread,
    scene: Scene,
    assets_root: PathBuf,
    textures: Textures,
    failed: FxHashSet<TextureHandle>,
    canvas: Option<Canvas>,
    layer_caches: Vec<Canvas>,
    buttons: Vec<Button>,
}

impl RaylibHost {
    pub fn new(config: &GameConfig, scene: Scene) -> Result<Self, String> {
        let (w, h) = config.window_size();
        let mut builder = raylib::init();
        builder
            .size(w as i32, h as i32)
            .resizable()
            .title(match scene {
                Scene::Game => "tilefox",
                Scene::Editor => "tilefox editor",
            });
        if config.vsync {
            builder.vsync();
        }
        let (mut rl, thread) = builder.build();
        rl.set_target_fps(config.target_fps);
        // Escape is a regular key here.
        rl.set_exit_key(None);

        let canvas = match scene {
            Scene::Game => Some(Canvas::new(
                &mut rl,
                &thread,
                config.render_width,
                config.render_height,
            )?),
            Scene::Editor => None,
        };

        Ok(Self {
            rl,
            thread,
            scene,
            assets_root: config.assets_root.clone(),
            textures: FxHashMap::default(),
            failed: FxHashSet::default(),
            canvas,
            layer_caches: Vec::new(),
            buttons: Vec::new(),
        })
    }

    /// Loads every texture the world asked for. A texture that fails stays
    /// pending and is not retried.
    fn load_pending(&mut self, world: &mut World) {
        let pending = world.resource::<TextureStore>().pending();
        for (handle, name) in pending {
            if self.failed.contains(&handle) {
                continue;
            }
            let path = self.assets_root.join(&name);
            let loaded = path
                .to_str()
                .ok_or_else(|| format!("non UTF-8 path {:?}", path))
                .and_then(|p| {
                    self.rl
                        .load_texture(&self.thread, p)
                        .map_err(|e| e.to_string())
                });
            match loaded {
                Ok(texture) => {
                    let (w, h) = (texture.width.max(0) as u32, texture.height.max(0) as u32);
                    self.textures.insert(handle, texture);
                    world.resource_mut::<TextureStore>().mark_ready(handle, w, h);
                }
                Err(e) => {
                    error!("Failed to load texture '{}': {}", name, e);
                    self.failed.insert(handle);
                }
            }
        }
    }

    fn refresh_screen(&mut self, world: &mut World) {
        let screen = ScreenSize {
            w: self.rl.get_screen_width(),
            h: self.rl.get_screen_height(),
        };
        if *world.resource::<ScreenSize>() != screen {
            info!("Window resized to {}x{}", screen.w, screen.h);
            *world.resource_mut::<ScreenSize>() = screen;
        }

        if self.scene != Scene::Game {
            return;
        }
        let Some(mut scale) = world.get_resource_mut::<CanvasScale>() else {
            return;
        };
        let before = scale.value();
        let factor = scale.fit(screen);
        let (dw, dh) = (scale.design_w as f32, scale.design_h as f32);
        if before != factor {
            info!("Canvas scale {}", factor);
        }
        let size = Vec2::new(dw, dh) * factor as f32;
        let origin = Vec2::new(
            ((screen.w as f32 - size.x) / 2.0).max(0.0).floor(),
            ((screen.h as f32 - size.y) / 2.0).max(0.0).floor(),
        );
        let viewport = Rect::from_position_size(origin, size);
        let mut camera = world.resource_mut::<GameCamera>();
        if camera.0.viewport != viewport || camera.0.scale != factor as f32 {
            camera.0.viewport = viewport;
            camera.0.scale = factor as f32;
        }
    }

    /// Sends the command of a clicked toolbar button over the bridge.
    fn toolbar_clicks(&mut self, world: &mut World) {
        let (Some(editor), Some(map)) = (
            world.get_resource::<Editor>(),
            world.get_resource::<TileMap>(),
        ) else {
            return;
        };
        self.buttons = toolbar_buttons(editor, map);
        if !self.rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            return;
        }
        let mouse = self.rl.get_mouse_position();
        let Some(command) = clicked(&self.buttons, Vec2::new(mouse.x, mouse.y)) else {
            return;
        };
        if let Some(bridge) = world.get_resource::<EditorBridge>()
            && let Err(e) = bridge.tx.send(command)
        {
            warn!("Editor command dropped: {}", e);
        }
    }
}

impl Host for RaylibHost {
    fn should_close(&mut self, _world: &mut World) -> bool {
        self.rl.window_should_close()
    }

    fn frame_time(&mut self, _world: &mut World) -> Duration {
        Duration::from_secs_f32(self.rl.get_frame_time().max(0.0))
    }

    fn pump_input(&mut self, world: &mut World) {
        self.load_pending(world);
        self.refresh_screen(world);
        if self.scene == Scene::Editor {
            self.toolbar_clicks(world);
        }
        let mut input = world.resource_mut::<InputState>();
        poll_input(&self.rl, &mut input);
    }

    fn present(&mut self, world: &mut World) {
        match self.scene {
            Scene::Game => {
                if let Some(canvas) = self.canvas.as_mut() {
                    draw_game(&mut self.rl, &self.thread, world, canvas, &self.textures);
                }
            }
            Scene::Editor => {
                repaint_layers(
                    &mut self.rl,
                    &self.thread,
                    world,
                    &mut self.layer_caches,
                    &self.textures,
                );
                draw_editor(
                    &mut self.rl,
                    &self.thread,
                    world,
                    &self.layer_caches,
                    &self.textures,
                    &self.buttons,
                );
            }
        }
    }
}
