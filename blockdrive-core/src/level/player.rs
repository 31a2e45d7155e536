//! The player vehicle.
//!
//! Each frame the controls produce a proposed pose,
//! which is committed only if it does not collide with the world.
//! A colliding proposal sends the player back to the start instead.
//! Reaching the exit is checked separately and does not skip the collision check.

use bevy::app::{self, App, Plugin};
use bevy::ecs::component::Component;
use bevy::ecs::message::MessageWriter;
use bevy::ecs::query::With;
use bevy::ecs::resource::Resource;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Query, Res, ResMut};
use bevy::time::{self, Time};

use super::agent::{Extent, Pose};
use super::session::{self, Session};
use super::{SystemSets, collision};

pub mod loader;

#[cfg(test)]
mod tests;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        app.init_resource::<Controls>();
        app.add_systems(app::Update, drive_system.in_set(SystemSets::Player));
    }
}

/// Keys currently held by the player.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Controls {
    pub forward: bool,
    pub reverse: bool,
    pub left:    bool,
    pub right:   bool,
}

/// Marks the player vehicle.
#[derive(Component)]
pub struct Player;

/// Speed of the player and its tunables.
///
/// Speeds and rates are per reference frame, see [`math::reference_frames`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Between `-max_speed / 2` and `max_speed`.
    pub speed:        f32,
    pub max_speed:    f32,
    pub acceleration: f32,
    pub turn_rate:    f32,
    /// Fraction of speed kept per reference frame while coasting.
    pub drag:         f32,
}

/// The pose the player respawns at.
#[derive(Component, Debug, Clone, Copy)]
pub struct StartPose(pub Pose);

/// Integrates the controls over `dt`.
///
/// Returns the new speed and the proposed pose.
#[must_use]
pub fn step(controls: Controls, kinematics: &Kinematics, pose: Pose, dt: f32) -> (f32, Pose) {
    let frames = math::reference_frames(dt);
    let Kinematics { mut speed, max_speed, acceleration, turn_rate, drag } = *kinematics;

    if controls.forward {
        speed = (speed + acceleration * frames).min(max_speed);
    } else if controls.reverse {
        speed = (speed - acceleration * frames).max(-max_speed / 2.);
    } else {
        speed *= drag.powf(frames);
    }

    let mut heading = pose.heading;
    if speed != 0. {
        let turn = turn_rate * frames * speed.signum();
        if controls.left {
            heading += turn;
        }
        if controls.right {
            heading -= turn;
        }
    }

    let position = pose.position + heading.forward_3d() * (speed * frames);
    (speed, Pose { position, heading })
}

fn drive_system(
    time: Res<Time<time::Virtual>>,
    controls: Res<Controls>,
    mut session: ResMut<Session>,
    arbiter: collision::Arbiter,
    mut player_query: Query<(&mut Pose, &mut Kinematics, &StartPose, &Extent), With<Player>>,
    mut won_writer: MessageWriter<session::Won>,
    mut collided_writer: MessageWriter<session::Collided>,
) {
    if !session.is_driving() {
        return;
    }

    let dt = time.delta_secs();
    for (mut pose, mut kinematics, start, extent) in &mut player_query {
        let (speed, proposed) = step(*controls, &kinematics, *pose, dt);
        let volume = proposed.bounds(extent);

        if arbiter.has_reached_exit(&volume) {
            session.won = true;
            won_writer.write(session::Won);
            bevy::log::info!("Player reached the exit at {}", proposed.position);
        }

        if arbiter.would_collide(&volume, session.collision_checks_enabled) {
            *pose = start.0;
            kinematics.speed = 0.;
            session.collided = true;
            collided_writer.write(session::Collided);
            bevy::log::info!("Player collided at {}", proposed.position);
        } else {
            if *pose != proposed {
                *pose = proposed;
            }
            kinematics.speed = speed;
        }
    }
}
