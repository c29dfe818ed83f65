//! Raylib input polling.
//!
//! Translates raylib's per-frame key and mouse edges into raw
//! [`InputState`] events. Keys with two physical variants (shift, control)
//! collapse into one logical key that releases only when both are up.
use raylib::prelude::*;

use crate::resources::input::{InputState, Key};
use crate::spatial::Vec2;

const KEYS: &[(KeyboardKey, Key)] = &[
    (KeyboardKey::KEY_A, Key::A),
    (KeyboardKey::KEY_B, Key::B),
    (KeyboardKey::KEY_C, Key::C),
    (KeyboardKey::KEY_D, Key::D),
    (KeyboardKey::KEY_E, Key::E),
    (KeyboardKey::KEY_F, Key::F),
    (KeyboardKey::KEY_G, Key::G),
    (KeyboardKey::KEY_H, Key::H),
    (KeyboardKey::KEY_I, Key::I),
    (KeyboardKey::KEY_J, Key::J),
    (KeyboardKey::KEY_K, Key::K),
    (KeyboardKey::KEY_L, Key::L),
    (KeyboardKey::KEY_M, Key::M),
    (KeyboardKey::KEY_N, Key::N),
    (KeyboardKey::KEY_O, Key::O),
    (KeyboardKey::KEY_P, Key::P),
    (KeyboardKey::KEY_Q, Key::Q),
    (KeyboardKey::KEY_R, Key::R),
    (KeyboardKey::KEY_S, Key::S),
    (KeyboardKey::KEY_T, Key::T),
    (KeyboardKey::KEY_U, Key::U),
    (KeyboardKey::KEY_V, Key::V),
    (KeyboardKey::KEY_W, Key::W),
    (KeyboardKey::KEY_X, Key::X),
    (KeyboardKey::KEY_Y, Key::Y),
    (KeyboardKey::KEY_Z, Key::Z),
    (KeyboardKey::KEY_ZERO, Key::Digit0),
    (KeyboardKey::KEY_ONE, Key::Digit1),
    (KeyboardKey::KEY_TWO, Key::Digit2),
    (KeyboardKey::KEY_THREE, Key::Digit3),
    (KeyboardKey::KEY_FOUR, Key::Digit4),
    (KeyboardKey::KEY_FIVE, Key::Digit5),
    (KeyboardKey::KEY_SIX, Key::Digit6),
    (KeyboardKey::KEY_SEVEN, Key::Digit7),
    (KeyboardKey::KEY_EIGHT, Key::Digit8),
    (KeyboardKey::KEY_NINE, Key::Digit9),
    (KeyboardKey::KEY_UP, Key::Up),
    (KeyboardKey::KEY_DOWN, Key::Down),
    (KeyboardKey::KEY_LEFT, Key::Left),
    (KeyboardKey::KEY_RIGHT, Key::Right),
    (KeyboardKey::KEY_SPACE, Key::Space),
    (KeyboardKey::KEY_LEFT_SHIFT, Key::Shift),
    (KeyboardKey::KEY_RIGHT_SHIFT, Key::Shift),
    (KeyboardKey::KEY_LEFT_CONTROL, Key::Control),
    (KeyboardKey::KEY_RIGHT_CONTROL, Key::Control),
    (KeyboardKey::KEY_ESCAPE, Key::Escape),
    (KeyboardKey::KEY_ENTER, Key::Enter),
    (KeyboardKey::KEY_F11, Key::F11),
];

const BUTTONS: &[(MouseButton, Key)] = &[
    (MouseButton::MOUSE_BUTTON_LEFT, Key::Lmb),
    (MouseButton::MOUSE_BUTTON_MIDDLE, Key::Mmb),
    (MouseButton::MOUSE_BUTTON_RIGHT, Key::Rmb),
];

/// Whether any physical key mapped to `key` is still down.
fn logical_down(rl: &RaylibHandle, key: Key) -> bool {
    KEYS.iter()
        .filter(|(_, k)| *k == key)
        .any(|(phys, _)| rl.is_key_down(*phys))
}

/// Feeds this frame's raylib events into `input`.
pub fn poll_input(rl: &RaylibHandle, input: &mut InputState) {
    input.set_focused(rl.is_window_focused());

    for (phys, key) in KEYS {
        if rl.is_key_pressed(*phys) {
            input.press(*key);
        }
        if rl.is_key_released(*phys) && !logical_down(rl, *key) {
            input.release(*key);
        }
    }
    for (button, key) in BUTTONS {
        if rl.is_mouse_button_pressed(*button) {
            input.press(*key);
        }
        if rl.is_mouse_button_released(*button) {
            input.release(*key);
        }
    }

    // raylib reports wheel-up as positive y.
    let wheel = rl.get_mouse_wheel_move_v();
    input.wheel(wheel.x, -wheel.y);

    let mouse = rl.get_mouse_position();
    input.move_pointer(Vec2::new(mouse.x, mouse.y));
}
