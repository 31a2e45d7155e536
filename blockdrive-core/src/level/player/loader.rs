use bevy::ecs::name::Name;
use bevy::ecs::world::World;

use super::{Kinematics, Player, StartPose};
use crate::level::agent::{Extent, Pose};
use crate::load::{self, StoredEntity};

/// Spawns the player at its start pose, standing still.
pub fn spawn(world: &mut World, player: &store::Player) -> load::Result<()> {
    let store::Kinematics { max_speed, acceleration, turn_rate, drag } = player.kinematics;
    if ![max_speed, acceleration, turn_rate, drag].iter().all(|value| value.is_finite()) {
        return Err(load::Error::NonFiniteFloat("player kinematics"));
    }
    if max_speed < 0. {
        return Err(load::Error::InvalidValue("player max speed"));
    }
    if !player.start.position.is_finite() {
        return Err(load::Error::NonFiniteFloat("player start"));
    }

    let start = Pose::from(player.start);
    world.spawn((
        StoredEntity,
        Name::new("Player"),
        Player,
        start,
        StartPose(start),
        Extent { half_size: player.half_size },
        Kinematics { speed: 0., max_speed, acceleration, turn_rate, drag },
    ));

    Ok(())
}
