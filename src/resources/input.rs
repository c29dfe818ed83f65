//! Edge-triggered input latch.
//!
//! Raw press/release/wheel events from the platform are buffered into
//! "new presses" and "new releases" sets. Once per fixed tick
//! [`InputState::update`] folds them into the held set, keeping a snapshot
//! of the previous held set so systems can ask for edges
//! ([`InputState::is_new_press`], [`InputState::is_new_release`]).
//!
//! Mouse buttons and wheel directions live in the same [`Key`] namespace as
//! keyboard keys. Wheel directions only ever produce presses; they are
//! dropped from the held set by [`InputState::after_update`] so a scroll
//! reads as held for exactly one tick.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::spatial::Vec2;

/// Logical key identifiers shared by keyboard, mouse buttons and wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Up,
    Down,
    Left,
    Right,
    Space,
    Shift,
    Control,
    Escape,
    Enter,
    F11,
    /// Left mouse button.
    Lmb,
    /// Middle mouse button.
    Mmb,
    /// Right mouse button.
    Rmb,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

impl Key {
    pub const SCROLL: [Key; 4] = [
        Key::ScrollUp,
        Key::ScrollDown,
        Key::ScrollLeft,
        Key::ScrollRight,
    ];

    pub const DIGITS: [Key; 10] = [
        Key::Digit0,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
        Key::Digit6,
        Key::Digit7,
        Key::Digit8,
        Key::Digit9,
    ];

    /// Numeric value of a digit key.
    pub fn digit(self) -> Option<usize> {
        Key::DIGITS.iter().position(|k| *k == self)
    }
}

/// Resource holding the latched input state for the current fixed tick.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    new_presses: FxHashSet<Key>,
    new_releases: FxHashSet<Key>,
    held: FxHashSet<Key>,
    previously_held: FxHashSet<Key>,
    /// Pointer position in window pixels.
    pointer: Vec2,
    pending_motion: Vec2,
    motion: Vec2,
    focused: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            new_presses: FxHashSet::default(),
            new_releases: FxHashSet::default(),
            held: FxHashSet::default(),
            previously_held: FxHashSet::default(),
            pointer: Vec2::ZERO,
            pending_motion: Vec2::ZERO,
            motion: Vec2::ZERO,
            focused: true,
        }
    }
}

impl InputState {
    /// Records a raw press. Ignored while the window is unfocused.
    pub fn press(&mut self, key: Key) {
        if self.focused {
            self.new_presses.insert(key);
        }
    }

    /// Records a raw release. Ignored while the window is unfocused.
    pub fn release(&mut self, key: Key) {
        if self.focused {
            self.new_releases.insert(key);
        }
    }

    /// Records a wheel event. Negative `dy` scrolls up, negative `dx` scrolls
    /// left; a zero component produces nothing for that axis.
    pub fn wheel(&mut self, dx: f32, dy: f32) {
        if dy < 0.0 {
            self.press(Key::ScrollUp);
        } else if dy > 0.0 {
            self.press(Key::ScrollDown);
        }
        if dx < 0.0 {
            self.press(Key::ScrollLeft);
        } else if dx > 0.0 {
            self.press(Key::ScrollRight);
        }
    }

    /// Records the pointer's new window position and accumulates its motion
    /// until the next [`update`](Self::update).
    pub fn move_pointer(&mut self, position: Vec2) {
        self.pending_motion += position - self.pointer;
        self.pointer = position;
    }

    /// Advances the latch by one tick.
    pub fn update(&mut self) {
        if !self.focused {
            return;
        }
        self.previously_held.clone_from(&self.held);
        self.held.extend(self.new_presses.drain());
        for key in self.new_releases.drain() {
            self.held.remove(&key);
        }
        self.motion = self.pending_motion;
        self.pending_motion = Vec2::ZERO;
    }

    /// Drops the wheel pseudo-keys so they never outlive their tick.
    pub fn after_update(&mut self) {
        for key in Key::SCROLL {
            self.held.remove(&key);
        }
    }

    pub fn clear_all(&mut self) {
        self.new_presses.clear();
        self.new_releases.clear();
        self.held.clear();
        self.previously_held.clear();
        self.motion = Vec2::ZERO;
        self.pending_motion = Vec2::ZERO;
    }

    /// Tracks window focus. Losing focus clears every set so no key stays
    /// stuck while events go elsewhere.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused && !focused {
            self.clear_all();
        }
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_new_press(&self, key: Key) -> bool {
        self.held.contains(&key) && !self.previously_held.contains(&key)
    }

    pub fn is_new_release(&self, key: Key) -> bool {
        !self.held.contains(&key) && self.previously_held.contains(&key)
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Pointer motion latched by the last [`update`](Self::update).
    pub fn pointer_motion(&self) -> Vec2 {
        self.motion
    }

    /// First digit key pressed this tick, if any.
    pub fn new_digit_press(&self) -> Option<usize> {
        Key::DIGITS
            .iter()
            .find(|k| self.is_new_press(**k))
            .and_then(|k| k.digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_new_for_one_tick_then_held() {
        let mut input = InputState::default();
        input.press(Key::Space);
        assert!(!input.is_held(Key::Space));

        input.update();
        assert!(input.is_held(Key::Space));
        assert!(input.is_new_press(Key::Space));

        input.update();
        assert!(input.is_held(Key::Space));
        assert!(!input.is_new_press(Key::Space));
    }

    #[test]
    fn release_edge_lasts_one_tick() {
        let mut input = InputState::default();
        input.press(Key::Lmb);
        input.update();
        input.release(Key::Lmb);
        input.update();
        assert!(!input.is_held(Key::Lmb));
        assert!(input.is_new_release(Key::Lmb));
        input.update();
        assert!(!input.is_new_release(Key::Lmb));
    }

    #[test]
    fn press_and_release_in_same_tick_never_holds() {
        let mut input = InputState::default();
        input.press(Key::A);
        input.release(Key::A);
        input.update();
        assert!(!input.is_held(Key::A));
        assert!(!input.is_new_press(Key::A));
    }

    #[test]
    fn wheel_is_cleared_after_update() {
        let mut input = InputState::default();
        input.wheel(0.0, -3.0);
        input.update();
        assert!(input.is_new_press(Key::ScrollUp));
        assert!(!input.is_held(Key::ScrollDown));
        input.after_update();
        assert!(!input.is_held(Key::ScrollUp));
        input.update();
        assert!(!input.is_new_press(Key::ScrollUp));
    }

    #[test]
    fn wheel_sign_convention() {
        let mut input = InputState::default();
        input.wheel(2.0, 1.0);
        input.update();
        assert!(input.is_held(Key::ScrollDown));
        assert!(input.is_held(Key::ScrollRight));
        assert!(!input.is_held(Key::ScrollLeft));
    }

    #[test]
    fn focus_loss_clears_everything() {
        let mut input = InputState::default();
        input.press(Key::D);
        input.update();
        input.press(Key::W);
        input.set_focused(false);
        assert!(!input.is_held(Key::D));
        input.press(Key::S);
        input.set_focused(true);
        input.update();
        assert!(!input.is_held(Key::W));
        assert!(!input.is_held(Key::S));
    }

    #[test]
    fn pointer_motion_is_latched() {
        let mut input = InputState::default();
        input.move_pointer(Vec2::new(10.0, 0.0));
        input.move_pointer(Vec2::new(12.0, 5.0));
        assert_eq!(input.pointer_motion(), Vec2::ZERO);
        input.update();
        assert_eq!(input.pointer_motion(), Vec2::new(12.0, 5.0));
        input.update();
        assert_eq!(input.pointer_motion(), Vec2::ZERO);
    }

    #[test]
    fn digit_lookup() {
        let mut input = InputState::default();
        input.press(Key::Digit3);
        input.update();
        assert_eq!(input.new_digit_press(), Some(3));
    }
}
