use bevy::ecs::entity::Entity;
use bevy::ecs::name::Name;
use bevy::ecs::world::World;

use super::{BoundsOverride, Exit, Obstacle, ObstacleKind};
use crate::level::agent::{Extent, Pose};
use crate::load::{self, StoredEntity};

/// Spawns the walls, buildings and stop signs of a map.
pub fn spawn(world: &mut World, level: &store::Level) -> load::Result<()> {
    for (obstacles, kind) in [
        (&level.walls, ObstacleKind::Wall),
        (&level.buildings, ObstacleKind::Building),
        (&level.stop_signs, ObstacleKind::StopSign),
    ] {
        for obstacle in obstacles {
            spawn_obstacle(world, obstacle, kind)?;
        }
    }
    Ok(())
}

pub fn spawn_obstacle(
    world: &mut World,
    obstacle: &store::Obstacle,
    kind: ObstacleKind,
) -> load::Result<Entity> {
    if !(obstacle.pose.position.is_finite() && obstacle.half_size.is_finite()) {
        return Err(load::Error::NonFiniteFloat("obstacle"));
    }
    if obstacle.half_size.min_element() < 0. {
        return Err(load::Error::InvalidValue("obstacle half size"));
    }

    let mut entity = world.spawn((
        StoredEntity,
        Name::new(format!("{kind:?}: {}", obstacle.label)),
        Obstacle { kind },
        Pose::from(obstacle.pose),
        Extent { half_size: obstacle.half_size },
    ));
    if let Some(bounds) = obstacle.bounds {
        if !(bounds.scale.is_finite() && bounds.offset.is_finite()) {
            return Err(load::Error::NonFiniteFloat("bounds override"));
        }
        entity.insert(BoundsOverride(bounds.into()));
    }
    Ok(entity.id())
}

/// Spawns the chosen exit tunnel.
pub fn spawn_exit(world: &mut World, exit: &store::Exit) -> load::Result<Entity> {
    if !(exit.pose.position.is_finite() && exit.half_size.is_finite()) {
        return Err(load::Error::NonFiniteFloat("exit"));
    }

    Ok(world
        .spawn((
            StoredEntity,
            Name::new(format!("Exit: {}", exit.label)),
            Exit,
            Pose::from(exit.pose),
            Extent { half_size: exit.half_size },
        ))
        .id())
}
