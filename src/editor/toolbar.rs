//! Toolbar widgets.
//!
//! Buttons are laid out left to right in the toolbar strip and map to an
//! [`EditorCommand`]. The platform draws them and sends the command of a
//! clicked button over the editor bridge.
use crate::editor::Editor;
use crate::editor::layout::TOOLBAR_HEIGHT;
use crate::events::editor::{EditorCommand, Pane, ZoomStep};
use crate::resources::tilemap::TileMap;
use crate::spatial::{Rect, Vec2};

const CHAR_WIDTH: f32 = 7.0;
const PADDING: f32 = 10.0;
const GAP: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub rect: Rect,
    pub command: EditorCommand,
    /// Drawn highlighted.
    pub active: bool,
}

/// Buttons for the current editor and map state.
pub fn toolbar_buttons(editor: &Editor, map: &TileMap) -> Vec<Button> {
    let (w, h) = (i64::from(map.width()), i64::from(map.height()));
    let mut entries: Vec<(String, EditorCommand, bool)> = vec![
        ("map +".into(), EditorCommand::Zoom(Pane::Map, ZoomStep::In), false),
        ("map -".into(), EditorCommand::Zoom(Pane::Map, ZoomStep::Out), false),
        ("map 1:1".into(), EditorCommand::Zoom(Pane::Map, ZoomStep::Reset), false),
        ("set +".into(), EditorCommand::Zoom(Pane::Tileset, ZoomStep::In), false),
        ("set -".into(), EditorCommand::Zoom(Pane::Tileset, ZoomStep::Out), false),
    ];
    for (index, (name, _)) in editor.tilesets().iter().enumerate() {
        entries.push((
            name.clone(),
            EditorCommand::SetTileset(index),
            index == editor.current_tileset(),
        ));
    }
    entries.extend([
        ("layer +".into(), EditorCommand::AddLayer, false),
        ("layer -".into(), EditorCommand::RemoveLayer, false),
        ("up".into(), EditorCommand::ShiftLayerUp, false),
        ("down".into(), EditorCommand::ShiftLayerDown, false),
        ("w+".into(), EditorCommand::ResizeMap { width: w + 1, height: h }, false),
        ("w-".into(), EditorCommand::ResizeMap { width: w - 1, height: h }, false),
        ("h+".into(), EditorCommand::ResizeMap { width: w, height: h + 1 }, false),
        ("h-".into(), EditorCommand::ResizeMap { width: w, height: h - 1 }, false),
        ("clear".into(), EditorCommand::ClearLayer, false),
        ("clear all".into(), EditorCommand::ClearMap, false),
        ("dump".into(), EditorCommand::DumpLayer, false),
    ]);

    let mut x = GAP;
    entries
        .into_iter()
        .map(|(label, command, active)| {
            let width = label.chars().count() as f32 * CHAR_WIDTH + PADDING;
            let rect = Rect::new(x, 2.0, width, TOOLBAR_HEIGHT - 4.0);
            x += width + GAP;
            Button {
                label,
                rect,
                command,
                active,
            }
        })
        .collect()
}

/// Command of the button under `point`.
pub fn clicked(buttons: &[Button], point: Vec2) -> Option<EditorCommand> {
    buttons
        .iter()
        .find(|b| b.rect.contains_point(point))
        .map(|b| b.command.clone())
}

/// Right-aligned readout: layer position, map size and cursor cell.
pub fn status_text(editor: &Editor, map: &TileMap, pointer: Vec2) -> String {
    format!(
        "layer {}/{}  {}x{}  {}",
        editor.selected_layer() + 1,
        map.layer_count(),
        map.width(),
        map.height(),
        editor.status_line(map, pointer)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::layout::Layout;
    use crate::resources::texturestore::TextureStore;

    fn editor() -> Editor {
        let mut store = TextureStore::new();
        let tilesets = ["forest", "cave"]
            .iter()
            .map(|n| (n.to_string(), store.request(n)))
            .collect();
        Editor::new(Layout::new(1280.0, 720.0, 512.0), tilesets, 16, 64.0)
    }

    #[test]
    fn buttons_do_not_overlap_and_fit_the_strip() {
        let map = TileMap::new(40, 35, 3);
        let buttons = toolbar_buttons(&editor(), &map);
        for pair in buttons.windows(2) {
            assert!(pair[0].rect.right() < pair[1].rect.x);
        }
        assert!(buttons.iter().all(|b| b.rect.bottom() <= TOOLBAR_HEIGHT));
        assert_eq!(buttons.iter().filter(|b| b.active).count(), 1);
    }

    #[test]
    fn resize_buttons_step_from_the_current_size() {
        let map = TileMap::new(40, 35, 3);
        let buttons = toolbar_buttons(&editor(), &map);
        let hit = buttons.iter().find(|b| b.label == "h-").map(|b| b.rect.center());
        let command = hit.and_then(|p| clicked(&buttons, p));
        assert_eq!(command, Some(EditorCommand::ResizeMap { width: 40, height: 34 }));
        assert_eq!(clicked(&buttons, Vec2::new(-5.0, 5.0)), None);
    }
}
