//! ECS resources made available to systems.
//!
//! Overview
//! - `camera` – world/screen mapping with integer zoom steps
//! - `debugmode` – presence toggles debug overlays and the inspector
//! - `gameconfig` – settings loaded from `config.ini`
//! - `input` – edge-triggered key and pointer latch
//! - `inspector` – hovered and inspected entities
//! - `level` – playfield bounds of the game scene
//! - `screensize` – window size and canvas scale
//! - `texturestore` – texture handles and their readiness
//! - `tilemap` – layered tile grid edited by the editor
//! - `worldtime` – frame time, fixed tick length and interpolation alpha
pub mod camera;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod inspector;
pub mod level;
pub mod screensize;
pub mod texturestore;
pub mod tilemap;
pub mod worldtime;
