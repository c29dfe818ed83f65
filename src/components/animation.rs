//! Frame-based sprite animation.
//!
//! A [`FrameSet`] is an ordered list of frames, each showing a region of a
//! sprite sheet for a fixed duration. An [`Animator`] owns one frame set per
//! key and tracks which one is playing.
use std::hash::Hash;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Component;
use log::warn;
use rustc_hash::FxHashMap;

use crate::spatial::Rect;

pub const MAX_FRAMES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub duration: f32,
    pub source: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSet {
    frames: ArrayVec<Frame, MAX_FRAMES>,
    index: usize,
    first: usize,
    timer: f32,
    looping: bool,
    finished: bool,
}

impl Default for FrameSet {
    fn default() -> Self {
        Self {
            frames: ArrayVec::new(),
            index: 0,
            first: 0,
            timer: 0.0,
            looping: true,
            finished: false,
        }
    }
}

impl FrameSet {
    /// Builds `count` equally timed frames laid out left to right on a grid of
    /// `cell_w`×`cell_h` cells, starting at cell (`cell_x`, `cell_y`).
    pub fn from_strip(
        duration: f32,
        cell_x: u32,
        cell_y: u32,
        cell_w: f32,
        cell_h: f32,
        count: usize,
    ) -> Self {
        let mut set = FrameSet::default();
        for i in 0..count {
            let source = Rect::new(
                (cell_x as usize + i) as f32 * cell_w,
                cell_y as f32 * cell_h,
                cell_w,
                cell_h,
            );
            if !set.push(Frame { duration, source }) {
                warn!("Frame strip truncated to {} frames", MAX_FRAMES);
                break;
            }
        }
        set
    }

    /// Plays once and then holds the last frame.
    pub fn once(mut self) -> Self {
        self.looping = false;
        self
    }

    /// Frame index used on start and after [`reset`](Self::reset).
    pub fn with_first_frame(mut self, first: usize) -> Self {
        self.first = first.min(self.frames.len().saturating_sub(1));
        self.index = self.first;
        self
    }

    /// Returns false when the set is full.
    pub fn push(&mut self, frame: Frame) -> bool {
        self.frames.try_push(frame).is_ok()
    }

    pub fn reset(&mut self) {
        self.index = self.first;
        self.timer = 0.0;
        self.finished = false;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.frames.is_empty() || self.finished {
            return;
        }

        self.timer += dt;
        loop {
            let duration = self.frames[self.index].duration.max(f32::EPSILON);
            if self.timer < duration {
                break;
            }
            self.timer -= duration;
            self.index += 1;

            if self.index >= self.frames.len() {
                if self.looping {
                    self.index = 0;
                } else {
                    self.index = self.frames.len() - 1;
                    self.finished = true;
                    break;
                }
            }
        }
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

/// Keyed collection of frame sets with one of them playing.
#[derive(Component, Debug, Clone)]
pub struct Animator<K>
where
    K: Copy + Eq + Hash + Send + Sync + 'static,
{
    sets: FxHashMap<K, FrameSet>,
    current: K,
}

impl<K> Animator<K>
where
    K: Copy + Eq + Hash + Send + Sync + 'static,
{
    pub fn new(initial: K) -> Self {
        Self {
            sets: FxHashMap::default(),
            current: initial,
        }
    }

    pub fn with(mut self, key: K, set: FrameSet) -> Self {
        self.sets.insert(key, set);
        self
    }

    /// Switches to `key`. The outgoing set is rewound only when the key
    /// actually changes, so replaying the current key keeps its progress.
    pub fn play(&mut self, key: K) {
        if key == self.current {
            return;
        }
        if let Some(outgoing) = self.sets.get_mut(&self.current) {
            outgoing.reset();
        }
        self.current = key;
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(set) = self.sets.get_mut(&self.current) {
            set.advance(dt);
        }
    }

    pub fn current_key(&self) -> K {
        self.current
    }

    pub fn current_set(&self) -> Option<&FrameSet> {
        self.sets.get(&self.current)
    }

    pub fn is_finished(&self) -> bool {
        self.current_set().is_some_and(FrameSet::is_finished)
    }

    /// Sprite-sheet region to draw right now.
    pub fn source(&self) -> Option<Rect> {
        self.current_set()
            .and_then(FrameSet::current)
            .map(|f| f.source)
    }
}
