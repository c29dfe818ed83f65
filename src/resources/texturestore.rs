//! Texture readiness store.
//!
//! Core systems never touch pixels. They ask for a texture by name and get a
//! [`TextureHandle`]; the platform layer loads pending handles and reports
//! their pixel size back with [`TextureStore::mark_ready`]. Anything that
//! depends on a texture (animation generation, tile clipping, drawing) polls
//! [`TextureStore::is_ready`] every tick until it flips.
use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;

use crate::spatial::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct TextureEntry {
    name: String,
    size: Option<(u32, u32)>,
}

#[derive(Resource, Debug, Default)]
pub struct TextureStore {
    entries: Vec<TextureEntry>,
    by_name: FxHashMap<String, TextureHandle>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `name`, registering it on first use.
    pub fn request(&mut self, name: &str) -> TextureHandle {
        if let Some(handle) = self.by_name.get(name) {
            return *handle;
        }
        let handle = TextureHandle(self.entries.len() as u32);
        self.entries.push(TextureEntry {
            name: name.to_string(),
            size: None,
        });
        self.by_name.insert(name.to_string(), handle);
        handle
    }

    pub fn is_ready(&self, handle: TextureHandle) -> bool {
        self.size(handle).is_some()
    }

    /// Pixel size once loaded.
    pub fn size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.entries.get(handle.index()).and_then(|e| e.size)
    }

    pub fn size_vec(&self, handle: TextureHandle) -> Option<Vec2> {
        self.size(handle).map(|(w, h)| Vec2::new(w as f32, h as f32))
    }

    pub fn name(&self, handle: TextureHandle) -> Option<&str> {
        self.entries.get(handle.index()).map(|e| e.name.as_str())
    }

    pub fn mark_ready(&mut self, handle: TextureHandle, width: u32, height: u32) {
        if let Some(entry) = self.entries.get_mut(handle.index()) {
            info!("Texture '{}' ready ({}x{})", entry.name, width, height);
            entry.size = Some((width, height));
        }
    }

    /// Handles still waiting for the loader.
    pub fn pending(&self) -> Vec<(TextureHandle, String)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.size.is_none())
            .map(|(i, e)| (TextureHandle(i as u32), e.name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_idempotent_and_starts_pending() {
        let mut store = TextureStore::new();
        let a = store.request("fox.png");
        let b = store.request("fox.png");
        let c = store.request("forest.png");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!store.is_ready(a));
        assert_eq!(store.pending().len(), 2);
    }

    #[test]
    fn mark_ready_exposes_size() {
        let mut store = TextureStore::new();
        let h = store.request("fox.png");
        store.mark_ready(h, 448, 256);
        assert!(store.is_ready(h));
        assert_eq!(store.size(h), Some((448, 256)));
        assert!(store.pending().is_empty());
    }
}
