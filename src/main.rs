//! tilefox entry point.
//!
//! A 2D platformer runtime and tilemap editor written in Rust using:
//! - **raylib** for windowing, graphics and input
//! - **bevy_ecs** for entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Parse the command line and load `config.ini`
//! 2. Open the window and set up the game or editor scene
//! 3. Run frames: input, fixed ticks, interpolation, drawing
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features render
//! cargo run --release --features render -- --editor
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use tilefox::game::{
    editor_fixed_schedule, editor_update_schedule, game_fixed_schedule, game_update_schedule,
    setup_editor, setup_game,
};
use tilefox::platform::host::{RaylibHost, Scene};
use tilefox::resources::debugmode::DebugMode;
use tilefox::resources::gameconfig::GameConfig;
use tilefox::runtime::Runtime;

/// tilefox: platformer runtime and tilemap editor
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Start the tilemap editor instead of the game.
    #[arg(long)]
    editor: bool,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Start with debug overlays and the entity inspector on.
    #[arg(long)]
    debug: bool,

    /// Asset directory, overriding the config file.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Integer canvas scale (1-20), overriding the config file.
    #[arg(long, value_name = "N")]
    scale: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("Using default configuration: {}", e);
    }
    if let Some(assets) = cli.assets {
        config.assets_root = assets;
    }
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }

    let scene = if cli.editor { Scene::Editor } else { Scene::Game };
    let mut host = match RaylibHost::new(&config, scene) {
        Ok(host) => host,
        Err(e) => {
            error!("Could not open the window: {}", e);
            std::process::exit(1);
        }
    };

    let mut world = World::new();
    let (fixed, update) = match scene {
        Scene::Game => {
            setup_game(&mut world, &config);
            (game_fixed_schedule(), game_update_schedule())
        }
        Scene::Editor => {
            setup_editor(&mut world, &config);
            (editor_fixed_schedule(), editor_update_schedule())
        }
    };
    if cli.debug {
        world.insert_resource(DebugMode {});
    }

    let mut runtime = Runtime::from_config(world, fixed, update, &config);
    if let Err(e) = runtime.initialize() {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("Starting {:?} at {} Hz", scene, config.fixed_hz);
    runtime.run(&mut host);
}
