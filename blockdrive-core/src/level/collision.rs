//! Collision detection between the player, the world and autonomous agents.
//!
//! All volumes are axis-aligned boxes recomputed from the current pose on every query.
//! Boxes that touch on all three axes collide.

use std::marker::PhantomData;

use bevy::app::{self, App, Plugin};
use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::query::{With, Without};
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Query, SystemParam};
use bevy::math::Vec3;
use bevy::math::bounding::{Aabb3d, IntersectsVolume};
use bevy_mod_config::{AppExt, Config, ConfigFieldFor, Manager, ReadConfig};
use itertools::Itertools;
use smallvec::SmallVec;

use super::agent::{Extent, Pose};
use super::follower::Follower;
use super::path::Path;
use super::pedestrian::Pedestrian;
use super::player::Player;
use super::vehicle::{Ordinal, Vehicle};
use super::{SystemSets, model};
use crate::try_log;

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
        app.init_config::<M, Conf>("core:collision");
        app.add_systems(app::Update, resolve_system.in_set(SystemSets::Resolve));
    }
}

#[derive(Config)]
pub struct Conf {
    /// Half extent of the cube around each pedestrian checked against the player.
    #[config(default = 0.5, min = 0.0, max = 10.0)]
    pub pedestrian_half_extent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Wall,
    Building,
    SignalPole,
    StopSign,
}

/// A static object the player cannot drive through.
#[derive(Component, Debug)]
pub struct Obstacle {
    pub kind: ObstacleKind,
}

/// Correction of the computed bounds of an [`Obstacle`].
#[derive(Component, Debug, Clone, Copy)]
pub struct BoundsOverride(pub math::BoundsAdjust);

/// The exit tunnel the player has to reach.
#[derive(Component)]
pub struct Exit;

/// The bounds of a static obstacle, with its correction applied.
#[must_use]
pub fn obstacle_volume(pose: &Pose, extent: &Extent, bounds: Option<&BoundsOverride>) -> Aabb3d {
    let volume = pose.bounds(extent);
    match bounds {
        Some(BoundsOverride(adjust)) => adjust.apply(volume),
        None => volume,
    }
}

/// Answers whether a proposed player volume hits anything.
#[derive(SystemParam)]
pub struct Arbiter<'w, 's> {
    conf:             ReadConfig<'w, 's, Conf>,
    obstacle_query: Query<
        'w,
        's,
        (&'static Pose, &'static Extent, Option<&'static BoundsOverride>),
        (With<Obstacle>, Without<Player>),
    >,
    pedestrian_query:
        Query<'w, 's, &'static Pose, (With<Pedestrian>, With<model::Ready>, Without<Player>)>,
    vehicle_query: Query<
        'w,
        's,
        (&'static Pose, &'static Extent),
        (With<Vehicle>, With<model::Ready>, Without<Player>),
    >,
    exit_query:       Query<'w, 's, (&'static Pose, &'static Extent), (With<Exit>, Without<Player>)>,
}

impl Arbiter<'_, '_> {
    /// Whether `volume` intersects any static obstacle,
    /// or any present pedestrian or vehicle if `check_agents` is true.
    #[must_use]
    pub fn would_collide(&self, volume: &Aabb3d, check_agents: bool) -> bool {
        if self
            .obstacle_query
            .iter()
            .any(|(pose, extent, bounds)| obstacle_volume(pose, extent, bounds).intersects(volume))
        {
            return true;
        }

        if !check_agents {
            return false;
        }

        let half_size = Vec3::splat(self.conf.read().pedestrian_half_extent);
        self.pedestrian_query
            .iter()
            .any(|pose| Aabb3d::new(pose.position, half_size).intersects(volume))
            || self.vehicle_query.iter().any(|(pose, extent)| pose.bounds(extent).intersects(volume))
    }

    /// Whether `volume` intersects the exit.
    #[must_use]
    pub fn has_reached_exit(&self, volume: &Aabb3d) -> bool {
        self.exit_query.iter().any(|(pose, extent)| pose.bounds(extent).intersects(volume))
    }
}

/// Finds the vehicles to reset among overlapping pairs.
///
/// For each overlapping pair, the vehicle with the lower ordinal is reset.
/// Each vehicle appears at most once in the result.
#[must_use]
pub fn overlap_resets(volumes: &[(Entity, Ordinal, Aabb3d)]) -> SmallVec<[Entity; 4]> {
    let mut resets: SmallVec<[(Ordinal, Entity); 4]> = volumes
        .iter()
        .tuple_combinations()
        .filter(|((_, _, a), (_, _, b))| a.intersects(b))
        .map(|(&(a, a_ordinal, _), &(b, b_ordinal, _))| {
            if a_ordinal <= b_ordinal { (a_ordinal, a) } else { (b_ordinal, b) }
        })
        .collect();
    resets.sort_unstable();
    resets.dedup();
    resets.into_iter().map(|(_, entity)| entity).collect()
}

fn resolve_system(
    mut vehicle_query: Query<
        (Entity, &Ordinal, &mut Pose, &Extent, &mut Follower),
        (With<Vehicle>, With<model::Ready>),
    >,
    path_query: Query<&Path>,
) {
    let volumes: Vec<_> = vehicle_query
        .iter()
        .map(|(entity, &ordinal, pose, extent, _)| (entity, ordinal, pose.bounds(extent)))
        .collect();

    for entity in overlap_resets(&volumes) {
        let (_, _, mut pose, _, mut follower) = try_log!(
            vehicle_query.get_mut(entity),
            expect "overlapping vehicle {entity:?} was just queried"
            or continue
        );
        let path = try_log!(
            path_query.get(follower.path),
            expect "vehicle {entity:?} follows a path entity"
            or continue
        );
        let Some(restart) = path.anchor(path.restart_anchor) else { continue };

        let cursor = path.restart_cursor();
        *pose = Pose {
            position: math::spatial(restart.position, pose.position.y),
            heading:  path.facing(cursor),
        };
        follower.cursor = cursor;
        bevy::log::debug!("Reset overlapping vehicle {entity:?} to its restart anchor");
    }
}
