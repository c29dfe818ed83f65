//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 120
//! vsync = true
//!
//! [render]
//! width = 360
//! height = 240
//! scale = 0        ; 0 fits the window
//!
//! [loop]
//! fixed_hz = 60
//! max_steps_per_frame = 5
//! max_frame_ms = 250
//!
//! [editor]
//! map_width = 40
//! map_height = 35
//! layers = 3
//! pane_width = 512
//! scroll_step = 64
//! max_stamp = 16
//!
//! [assets]
//! root = ./assets
//! ```

use std::path::PathBuf;
use std::time::Duration;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_RENDER_WIDTH: u32 = 360;
const DEFAULT_RENDER_HEIGHT: u32 = 240;
const DEFAULT_SCALE: u32 = 0;
const DEFAULT_FIXED_HZ: u32 = 60;
const DEFAULT_MAX_STEPS: u32 = 5;
const DEFAULT_MAX_FRAME_MS: u64 = 250;
const DEFAULT_MAP_WIDTH: u32 = 40;
const DEFAULT_MAP_HEIGHT: u32 = 35;
const DEFAULT_LAYERS: u32 = 3;
const DEFAULT_PANE_WIDTH: u32 = 512;
const DEFAULT_SCROLL_STEP: u32 = 64;
const DEFAULT_MAX_STAMP: u32 = 16;
const DEFAULT_ASSETS_ROOT: &str = "./assets";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    /// Design resolution of the game canvas.
    pub render_width: u32,
    pub render_height: u32,
    /// Canvas scale; 0 fits the window.
    pub scale: u32,
    pub fixed_hz: u32,
    pub max_steps_per_frame: u32,
    pub max_frame_ms: u64,
    pub map_width: u32,
    pub map_height: u32,
    pub layers: u32,
    pub pane_width: u32,
    /// Editor camera scroll step in pixels (per second for WASD).
    pub scroll_step: u32,
    pub max_stamp: u32,
    pub assets_root: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            scale: DEFAULT_SCALE,
            fixed_hz: DEFAULT_FIXED_HZ,
            max_steps_per_frame: DEFAULT_MAX_STEPS,
            max_frame_ms: DEFAULT_MAX_FRAME_MS,
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            layers: DEFAULT_LAYERS,
            pane_width: DEFAULT_PANE_WIDTH,
            scroll_step: DEFAULT_SCROLL_STEP,
            max_stamp: DEFAULT_MAX_STAMP,
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, {}x{} render, scale={}, {} Hz (max {} steps, {} ms)",
            self.window_width,
            self.window_height,
            self.render_width,
            self.render_height,
            self.scale,
            self.fixed_hz,
            self.max_steps_per_frame,
            self.max_frame_ms
        );

        Ok(())
    }

    /// Parse configuration from an INI string. Used by tests and by callers
    /// that embed a config.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();

        // [window] section
        if let Some(v) = uint("window", "width") {
            self.window_width = v as u32;
        }
        if let Some(v) = uint("window", "height") {
            self.window_height = v as u32;
        }
        if let Some(v) = uint("window", "target_fps") {
            self.target_fps = v as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [render] section
        if let Some(v) = uint("render", "width") {
            self.render_width = (v as u32).max(1);
        }
        if let Some(v) = uint("render", "height") {
            self.render_height = (v as u32).max(1);
        }
        if let Some(v) = uint("render", "scale") {
            self.scale = v as u32;
        }

        // [loop] section
        if let Some(v) = uint("loop", "fixed_hz") {
            self.fixed_hz = (v as u32).max(1);
        }
        if let Some(v) = uint("loop", "max_steps_per_frame") {
            self.max_steps_per_frame = (v as u32).max(1);
        }
        if let Some(v) = uint("loop", "max_frame_ms") {
            self.max_frame_ms = v.max(1);
        }

        // [editor] section
        if let Some(v) = uint("editor", "map_width") {
            self.map_width = v as u32;
        }
        if let Some(v) = uint("editor", "map_height") {
            self.map_height = v as u32;
        }
        if let Some(v) = uint("editor", "layers") {
            self.layers = (v as u32).max(1);
        }
        if let Some(v) = uint("editor", "pane_width") {
            self.pane_width = v as u32;
        }
        if let Some(v) = uint("editor", "scroll_step") {
            self.scroll_step = v as u32;
        }
        if let Some(v) = uint("editor", "max_stamp") {
            self.max_stamp = (v as u32).max(1);
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.assets_root = PathBuf::from(root);
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));
        config.set("render", "scale", Some(self.scale.to_string()));

        config.set("loop", "fixed_hz", Some(self.fixed_hz.to_string()));
        config.set(
            "loop",
            "max_steps_per_frame",
            Some(self.max_steps_per_frame.to_string()),
        );
        config.set("loop", "max_frame_ms", Some(self.max_frame_ms.to_string()));

        config.set("editor", "map_width", Some(self.map_width.to_string()));
        config.set("editor", "map_height", Some(self.map_height.to_string()));
        config.set("editor", "layers", Some(self.layers.to_string()));
        config.set("editor", "pane_width", Some(self.pane_width.to_string()));
        config.set("editor", "scroll_step", Some(self.scroll_step.to_string()));
        config.set("editor", "max_stamp", Some(self.max_stamp.to_string()));

        config.set(
            "assets",
            "root",
            Some(self.assets_root.to_string_lossy().into_owned()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn fixed_step(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.fixed_hz.max(1)))
    }

    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms)
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[render]\nscale = 4\n[loop]\nmax_steps_per_frame = 8\n")
            .unwrap();
        assert_eq!(config.scale, 4);
        assert_eq!(config.max_steps_per_frame, 8);
        assert_eq!(config.fixed_hz, 60);
        assert_eq!(config.render_width, 360);
        assert_eq!(config.map_width, 40);
    }

    #[test]
    fn degenerate_loop_values_are_raised() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[loop]\nfixed_hz = 0\nmax_steps_per_frame = 0\n")
            .unwrap();
        assert_eq!(config.fixed_hz, 1);
        assert_eq!(config.max_steps_per_frame, 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/tilefox.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, GameConfig::with_path("/nonexistent/tilefox.ini"));
    }

    #[test]
    fn assets_root_is_read() {
        let mut config = GameConfig::new();
        config.load_from_str("[assets]\nroot = /tmp/tiles\n").unwrap();
        assert_eq!(config.assets_root, PathBuf::from("/tmp/tiles"));
    }
}
