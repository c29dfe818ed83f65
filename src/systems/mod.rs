//! ECS systems.
//!
//! Fixed-tick systems advance the simulation; frame systems interpolate
//! and track the pointer. Scene setup in [`crate::game`] decides which run
//! where and in what order.
//!
//! Submodules overview
//! - [`character`] – character controller and its animations
//! - [`collision`] – collider sync, pair checks, sweeps and logging
//! - [`editor`] – feed input, commands and window size into the editor
//! - [`input`] – latch input at tick boundaries, debug toggle
//! - [`inspector`] – debug hover/selection and inspector actions
//! - [`interpolation`] – transform snapshots and render blending
//! - [`tilemap`] – tileset readiness polling
//! - [`time`] – world time bookkeeping for the runtime

pub mod character;
pub mod collision;
pub mod editor;
pub mod input;
pub mod inspector;
pub mod interpolation;
pub mod tilemap;
pub mod time;
