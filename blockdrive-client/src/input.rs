//! Keyboard bindings.
//!
//! Driving uses WASD or the arrow keys,
//! `N` toggles day and night and `Enter` or `Space` starts the session.

use bevy::app::{self, App, Plugin};
use bevy::ecs::message::MessageWriter;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Res, ResMut};
use bevy::input::ButtonInput;
use bevy::input::keyboard::KeyCode;
use blockdrive::level::environ::ToggleDayNight;
use blockdrive::level::player::Controls;
use blockdrive::level::session::StartRequested;
use blockdrive::level::SystemSets;

#[cfg(test)]
mod tests;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        app.add_systems(app::Update, keyboard_system.in_set(SystemSets::Input));
    }
}

const FORWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const REVERSE_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const START_KEYS: [KeyCode; 3] = [KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space];
const TOGGLE_LIGHTING_KEY: KeyCode = KeyCode::KeyN;

#[must_use]
pub fn controls_from(keys: &ButtonInput<KeyCode>) -> Controls {
    Controls {
        forward: keys.any_pressed(FORWARD_KEYS),
        reverse: keys.any_pressed(REVERSE_KEYS),
        left:    keys.any_pressed(LEFT_KEYS),
        right:   keys.any_pressed(RIGHT_KEYS),
    }
}

fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut controls: ResMut<Controls>,
    mut start_writer: MessageWriter<StartRequested>,
    mut toggle_writer: MessageWriter<ToggleDayNight>,
) {
    *controls = controls_from(&keys);

    if keys.any_just_pressed(START_KEYS) {
        start_writer.write(StartRequested);
    }
    if keys.just_pressed(TOGGLE_LIGHTING_KEY) {
        toggle_writer.write(ToggleDayNight);
    }
}

/// A control held for a whole headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Hold {
    Forward,
    Reverse,
    Left,
    Right,
}

#[must_use]
pub fn held_controls(hold: &[Hold]) -> Controls {
    Controls {
        forward: hold.contains(&Hold::Forward),
        reverse: hold.contains(&Hold::Reverse),
        left:    hold.contains(&Hold::Left),
        right:   hold.contains(&Hold::Right),
    }
}

/// Starts the session immediately and holds fixed controls.
pub struct HeadlessPlug {
    pub hold: Vec<Hold>,
}

impl Plugin for HeadlessPlug {
    fn build(&self, app: &mut App) {
        app.insert_resource(held_controls(&self.hold));
        app.add_systems(app::Startup, |mut writer: MessageWriter<StartRequested>| {
            writer.write(StartRequested);
        });
    }
}
