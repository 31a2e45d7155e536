use bevy::ecs::name::Name;
use bevy::ecs::world::World;

use super::{Pedestrian, Walker};
use crate::level::agent::Pose;
use crate::level::model;
use crate::level::path::loader::PathMap;
use crate::load::{self, StoredEntity};

/// Spawns the pedestrians of a map.
pub fn spawn(
    world: &mut World,
    paths: &PathMap,
    pedestrians: &[store::Pedestrian],
) -> load::Result<()> {
    for pedestrian in pedestrians {
        if !pedestrian.speed.is_finite() || pedestrian.speed < 0. {
            return Err(load::Error::InvalidValue("pedestrian speed"));
        }

        let placement = paths.place(world, &pedestrian.path, pedestrian.start_anchor)?;
        let mut entity = world.spawn((
            StoredEntity,
            Name::new(format!("Pedestrian: {}", pedestrian.label)),
            Pedestrian,
            Pose::new(
                math::spatial(placement.anchor.position, pedestrian.altitude),
                placement.heading,
            ),
            Walker {
                path:           placement.path,
                cursor:         placement.cursor,
                speed:          pedestrian.speed,
                animation_time: 0.,
            },
        ));
        model::insert_presence(&mut entity, pedestrian.model.as_deref());
    }

    Ok(())
}
