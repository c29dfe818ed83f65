//! tilefox library.
//!
//! A small 2D platformer runtime and a tilemap editor on top of `bevy_ecs`.
//! Everything except the raylib [`platform`] layer is headless, so the
//! simulation, the editor mode machine and the loop driver are exercised by
//! the integration tests directly.

pub mod clock;
pub mod components;
pub mod editor;
pub mod events;
pub mod game;
#[cfg(feature = "render")]
pub mod platform;
pub mod resources;
pub mod runtime;
pub mod spatial;
pub mod systems;
