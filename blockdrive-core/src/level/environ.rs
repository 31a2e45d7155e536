//! Day and night lighting.

use bevy::app::{self, App, Plugin};
use bevy::ecs::message::{Message, MessageReader};
use bevy::ecs::resource::Resource;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::ResMut;

use super::SystemSets;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        app.init_resource::<Lighting>();
        app.add_message::<ToggleDayNight>();
        app.add_systems(app::Update, toggle_system.in_set(SystemSets::Session));
    }
}

/// Lighting of the block, read by the presentation layer.
#[derive(Resource, Debug, Default)]
pub struct Lighting {
    pub night: bool,
}

/// Requests switching between day and night.
#[derive(Message)]
pub struct ToggleDayNight;

fn toggle_system(mut reader: MessageReader<ToggleDayNight>, mut lighting: ResMut<Lighting>) {
    // Two toggles in the same frame cancel out.
    let toggles = reader.read().count();
    if toggles % 2 == 1 {
        lighting.night = !lighting.night;
        bevy::log::info!("Lighting switched to {}", if lighting.night { "night" } else { "day" });
    }
}
