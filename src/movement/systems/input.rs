//! Movement domain: keyboard input latch.

use bevy::prelude::*;

use crate::movement::{MovementController, Player};

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];

/// Horizontal axis from the keyboard, -1, 0 or 1.
pub(crate) fn horizontal_axis(keyboard: &ButtonInput<KeyCode>) -> f32 {
    let mut x = 0.0;
    if keyboard.any_pressed(LEFT_KEYS) {
        x -= 1.0;
    }
    if keyboard.any_pressed(RIGHT_KEYS) {
        x += 1.0;
    }
    x
}

/// Forward keyboard state to every player controller.
///
/// Only edges reach `set_jump_intent`, so holding the button never re-opens
/// the buffer window.
pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut controllers: Query<&mut MovementController, With<Player>>,
) {
    let x = horizontal_axis(&keyboard);
    let pressed = keyboard.any_just_pressed(JUMP_KEYS);
    let released = keyboard.any_just_released(JUMP_KEYS) && !keyboard.any_pressed(JUMP_KEYS);

    for mut controller in &mut controllers {
        controller.set_horizontal_intent(x);
        // A tap can press and release within one frame; deliver both edges.
        if pressed {
            controller.set_jump_intent(true);
        }
        if released {
            controller.set_jump_intent(false);
        }
    }
}
