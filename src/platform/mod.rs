//! Raylib platform layer (feature `render`).
//!
//! Everything that touches the window, the GPU or the OS input queue lives
//! here; the rest of the crate runs headless.
//!
//! - [`canvas`]: offscreen render textures and colour helpers
//! - [`draw`]: game and editor draw passes
//! - [`host`]: the window host driving the runtime
//! - [`input`]: raylib key and mouse mapping

pub mod canvas;
pub mod draw;
pub mod host;
pub mod input;
