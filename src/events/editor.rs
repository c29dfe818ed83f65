//! Commands from editor UI widgets.
//!
//! Toolbar buttons and fields do not touch the editor directly. They push an
//! [`EditorCommand`] into the [`EditorBridge`] channel, and the
//! `editor_commands` system drains it once per tick before the mode machine
//! runs.
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Which camera a zoom command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Map,
    Tileset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Zoom(Pane, ZoomStep),
    /// Switch to the tileset at this index of the tileset list.
    SetTileset(usize),
    AddLayer,
    RemoveLayer,
    ShiftLayerUp,
    ShiftLayerDown,
    /// Value of the 1-based layer field. Clamped to the layer count.
    SelectLayer(i64),
    /// Map size in tiles. Rejected unless both sides are in [1, 500].
    ResizeMap { width: i64, height: i64 },
    /// Empty every cell of the selected layer.
    ClearLayer,
    /// Empty every layer.
    ClearMap,
    /// Log the selected layer as JSON.
    DumpLayer,
}

/// Channel pair carrying [`EditorCommand`]s from UI glue into the world.
#[derive(Resource)]
pub struct EditorBridge {
    pub tx: Sender<EditorCommand>,
    pub rx: Receiver<EditorCommand>,
}

impl EditorBridge {
    pub fn new() -> Self {
        let (tx, rx) = unbounded::<EditorCommand>();
        Self { tx, rx }
    }

    /// A sender for widgets living outside the world.
    pub fn sender(&self) -> Sender<EditorCommand> {
        self.tx.clone()
    }
}

impl Default for EditorBridge {
    fn default() -> Self {
        Self::new()
    }
}
