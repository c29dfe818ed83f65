//! Event types and observers.
//!
//! Events are triggered with `commands.trigger` and handled by observers
//! registered at scene setup. UI commands for the editor travel over a
//! channel instead, drained once per tick.
//!
//! Submodules:
//! - [`collision`] – a pair of entities started or stopped touching
//! - [`editor`] – toolbar commands and the channel carrying them
//! - [`inspector`] – debug inspector actions on an entity
//! - [`switchdebug`] – toggle debug overlays and the inspector
pub mod collision;
pub mod editor;
pub mod inspector;
pub mod switchdebug;
