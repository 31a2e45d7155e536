use bevy::input::ButtonInput;
use bevy::input::keyboard::KeyCode;

use super::{Hold, controls_from, held_controls};

#[test]
fn arrows_and_wasd_are_synonyms() {
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowUp);
    keys.press(KeyCode::KeyA);

    let controls = controls_from(&keys);
    assert!(controls.forward);
    assert!(controls.left);
    assert!(!controls.reverse);
    assert!(!controls.right);

    keys.release(KeyCode::ArrowUp);
    keys.press(KeyCode::KeyW);
    assert!(controls_from(&keys).forward);
}

#[test]
fn released_keys_clear_controls() {
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyD);
    keys.release(KeyCode::KeyD);
    let controls = controls_from(&keys);
    assert!(!controls.right);
}

#[test]
fn held_controls_from_options() {
    let controls = held_controls(&[Hold::Forward, Hold::Right]);
    assert!(controls.forward);
    assert!(controls.right);
    assert!(!controls.left);
    assert!(!controls.reverse);
}
