//! Pedestrians walking along paths at a fixed speed in units per second.
//!
//! Unlike vehicles, pedestrians do not steer.
//! A pedestrian walks straight to its target anchor,
//! snaps onto it on arrival and turns to face the next target at once.

use std::marker::PhantomData;

use bevy::app::{self, App, Plugin};
use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::query::{With, Without};
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Query, Res};
use bevy::time::{self, Time};
use bevy_mod_config::{AppExt, Config, ConfigFieldFor, Manager, ReadConfig};
use math::Heading;

use super::agent::Pose;
use super::follower::Follower;
use super::path::{Cursor, Path};
use super::{SystemSets, model};
use crate::QueryTryLog;

pub mod loader;


pub struct Plug<M>(PhantomData<M>);

impl<M> Default for Plug<M> {
    fn default() -> Self { Self(PhantomData) }
}

impl<M: Manager + Default> Plugin for Plug<M>
where
    Conf: ConfigFieldFor<M>,
{
    fn build(&self, app: &mut App) {
        app.init_config::<M, Conf>("core:pedestrian");
        app.add_systems(app::Update, walk_system.in_set(SystemSets::Follow));
    }
}

#[derive(Config)]
pub struct Conf {
    /// Extra distance within which a pedestrian snaps onto its target anchor.
    #[config(default = 0.01, min = 0.0, max = 1.0)]
    pub arrival_epsilon: f32,
}

/// Marks a pedestrian.
#[derive(Component)]
pub struct Pedestrian;

/// Walking state of a pedestrian.
#[derive(Component, Debug, Clone)]
pub struct Walker {
    /// The [`Path`] entity walked.
    pub path:           Entity,
    pub cursor:         Cursor,
    /// Walking speed in units per second.
    pub speed:          f32,
    /// Seconds of animation played so far.
    pub animation_time: f32,
}

/// Moves `pose` towards the target anchor by `speed * dt`.
///
/// Returns the new pose and cursor.
#[must_use]
pub fn walk(
    pose: Pose,
    cursor: Cursor,
    path: &Path,
    speed: f32,
    arrival_epsilon: f32,
    dt: f32,
) -> (Pose, Cursor) {
    let Some(target) = path.anchor(cursor.target) else { return (pose, cursor) };

    let travel = speed * dt;
    let offset = target.position - pose.planar();
    let remaining = offset.length();

    if remaining <= travel + arrival_epsilon {
        let next_cursor = cursor.advance(path.len(), path.topology);
        let heading = match path.anchor(next_cursor.target) {
            Some(next) if next.position != target.position => {
                Heading::from_planar(next.position - target.position)
            }
            _ => pose.heading,
        };
        let position = math::spatial(target.position, pose.position.y);
        (Pose { position, heading }, next_cursor)
    } else {
        let step = offset / remaining * travel;
        let position = pose.position + math::spatial(step, 0.);
        (Pose { position, heading: pose.heading }, cursor)
    }
}

fn walk_system(
    time: Res<Time<time::Virtual>>,
    conf: ReadConfig<Conf>,
    mut walker_query: Query<(&mut Pose, &mut Walker), (With<model::Ready>, Without<Follower>)>,
    path_query: Query<&Path>,
) {
    let conf = conf.read();
    let dt = time.delta_secs();

    for (mut pose, mut walker) in &mut walker_query {
        walker.animation_time += dt;

        let Some(path) = path_query.log_get(walker.path) else { continue };
        let (new_pose, cursor) =
            walk(*pose, walker.cursor, path, walker.speed, conf.arrival_epsilon, dt);
        if new_pose != *pose {
            *pose = new_pose;
        }
        walker.cursor = cursor;
    }
}
