//! Logging of session outcomes.

use bevy::app::{self, App, AppExit, Plugin};
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::query::With;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Local, Query, Res};
use blockdrive::level::agent::Pose;
use blockdrive::level::player::Player;
use blockdrive::level::session::{self, Session};
use blockdrive::load::LoadedMap;

use crate::UpdateSystemSets;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        app.add_systems(app::Update, report_system.in_set(UpdateSystemSets::Report));
    }
}

fn report_system(
    mut won_reader: MessageReader<session::Won>,
    mut collided_reader: MessageReader<session::Collided>,
    map: Res<LoadedMap>,
) {
    let title = map.0.as_ref().map_or("unknown map", |meta| meta.title.as_str());
    for _ in won_reader.read() {
        bevy::log::info!("Escaped from {title}");
    }
    for _ in collided_reader.read() {
        bevy::log::info!("Crashed in {title}, press Enter to retry");
    }
}

/// Exits the app after a fixed number of frames.
pub struct ExitAfter(pub u32);

impl Plugin for ExitAfter {
    fn build(&self, app: &mut App) {
        let frames = self.0;
        app.add_systems(
            app::Update,
            (move |mut elapsed: Local<u32>,
                   session: Res<Session>,
                   player_query: Query<&Pose, With<Player>>,
                   mut exit_writer: MessageWriter<AppExit>| {
                *elapsed += 1;
                if *elapsed < frames {
                    return;
                }

                for pose in &player_query {
                    bevy::log::info!(
                        "After {frames} frames: player at {}, won = {}, collided = {}",
                        pose.position,
                        session.won,
                        session.collided,
                    );
                }
                exit_writer.write(AppExit::Success);
            })
            .in_set(UpdateSystemSets::Report),
        );
    }
}
