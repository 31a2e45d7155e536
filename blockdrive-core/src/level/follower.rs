//! Waypoint following for autonomous vehicles.
//!
//! A follower cruises at a fixed speed towards the target anchor of its [`Path`],
//! turning the shorter way by at most its turn rate per reference frame.
//! The target advances once the vehicle is strictly closer than
//! [`Conf::arrival_threshold`] to it.

use std::marker::PhantomData;

use bevy::app::{self, App, Plugin};
use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::query::With;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Query, Res};
use bevy::math::Vec2;
use bevy::time::{self, Time};
use bevy_mod_config::{AppExt, Config, ConfigFieldFor, Manager, ReadConfig};
use math::Heading;

use super::agent::Pose;
use super::path::{Cursor, Path};
use super::{SystemSets, gate, model, signal};
use crate::QueryTryLog;

#[cfg(test)]
mod tests;

/// Heading differences below this are not corrected.
const HEADING_EPSILON: f32 = 1e-4;

pub struct Plug<M>(PhantomData<M>);

impl<M> Default for Plug<M> {
    fn default() -> Self { Self(PhantomData) }
}

impl<M: Manager + Default> Plugin for Plug<M>
where
    Conf: ConfigFieldFor<M>,
{
    fn build(&self, app: &mut App) {
        app.init_config::<M, Conf>("core:follower");
        app.add_systems(app::Update, follow_system.in_set(SystemSets::Follow));
    }
}

#[derive(Config)]
pub struct Conf {
    /// Distance below which a vehicle has reached its target anchor.
    #[config(default = 10.0, min = 0.0, max = 100.0)]
    pub arrival_threshold: f32,
}

/// Steering state of an autonomous vehicle.
#[derive(Component, Debug, Clone)]
pub struct Follower {
    /// The [`Path`] entity followed.
    pub path:      Entity,
    pub cursor:    Cursor,
    /// Distance travelled per reference frame.
    pub speed:     f32,
    /// Maximum heading change per reference frame, in radians.
    pub turn_rate: f32,
}

/// Moves `pose` one step along `path`.
///
/// Returns the new pose and cursor.
/// The vertical component of the position is preserved.
#[must_use]
pub fn advance(
    pose: Pose,
    cursor: Cursor,
    path: &Path,
    speed: f32,
    turn_rate: f32,
    arrival_threshold: f32,
    dt: f32,
) -> (Pose, Cursor) {
    let Some(target) = path.anchor(cursor.target) else { return (pose, cursor) };

    let mut cursor = cursor;
    let mut target = target.position;
    if (target - pose.planar()).length() < arrival_threshold {
        cursor = cursor.advance(path.len(), path.topology);
        if let Some(next) = path.anchor(cursor.target) {
            target = next.position;
        }
    }

    let frames = math::reference_frames(dt);
    let mut heading = pose.heading;

    let offset = target - pose.planar();
    if offset != Vec2::ZERO {
        let desired = Heading::from_planar(offset);
        let delta = heading.closest_distance(desired);
        if delta.abs() > HEADING_EPSILON {
            heading = heading.restricted_turn(desired, turn_rate * frames);
        }
    }

    let position = pose.position + heading.forward_3d() * speed * frames;
    (Pose { position, heading }, cursor)
}

fn follow_system(
    time: Res<Time<time::Virtual>>,
    conf: ReadConfig<Conf>,
    mut follower_query: Query<
        (&mut Pose, &mut Follower, Option<&gate::ControlZones>),
        With<model::Ready>,
    >,
    path_query: Query<&Path>,
    signal_query: Query<&signal::Group>,
) {
    let conf = conf.read();
    let dt = time.delta_secs();
    if dt <= 0. {
        return;
    }

    for (mut pose, mut follower, zones) in &mut follower_query {
        if let Some(gate::ControlZones(zones)) = zones {
            let may_advance = gate::may_advance(pose.planar(), zones, |signal| {
                signal_query.get(signal).ok().map(|group| group.color)
            });
            if !may_advance {
                continue;
            }
        }

        let Some(path) = path_query.log_get(follower.path) else { continue };
        let (new_pose, cursor) = advance(
            *pose,
            follower.cursor,
            path,
            follower.speed,
            follower.turn_rate,
            conf.arrival_threshold,
            dt,
        );
        *pose = new_pose;
        follower.cursor = cursor;
    }
}
