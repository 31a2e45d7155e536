use bevy::ecs::name::Name;
use bevy::ecs::world::World;
use bevy::math::Rect;

use super::{Ordinal, Vehicle};
use crate::level::agent::{Extent, Pose};
use crate::level::follower::Follower;
use crate::level::gate::{ControlZone, ControlZones};
use crate::level::model;
use crate::level::path::loader::PathMap;
use crate::level::signal::loader::SignalMap;
use crate::load::{self, StoredEntity};

/// Spawns the autonomous vehicles of a map, numbering them in declaration order.
pub fn spawn(
    world: &mut World,
    paths: &PathMap,
    signals: &SignalMap,
    vehicles: &[store::Vehicle],
) -> load::Result<()> {
    for (ordinal, vehicle) in (0..).zip(vehicles) {
        if !(vehicle.speed.is_finite() && vehicle.turn_rate.is_finite()) {
            return Err(load::Error::NonFiniteFloat("vehicle speed"));
        }
        if vehicle.turn_rate < 0. {
            return Err(load::Error::InvalidValue("vehicle turn rate"));
        }

        let placement = paths.place(world, &vehicle.path, vehicle.start_anchor)?;
        let zones = vehicle
            .zones
            .iter()
            .map(|zone| {
                Ok(ControlZone {
                    rect:   Rect::from_corners(zone.min, zone.max),
                    signal: signals.resolve(&zone.signal)?,
                })
            })
            .collect::<load::Result<Vec<_>>>()?;

        let mut entity = world.spawn((
            StoredEntity,
            Name::new(format!("Vehicle: {}", vehicle.label)),
            Vehicle,
            Ordinal(ordinal),
            Pose::new(math::spatial(placement.anchor.position, vehicle.altitude), placement.heading),
            Extent { half_size: vehicle.half_size },
            Follower {
                path:      placement.path,
                cursor:    placement.cursor,
                speed:     vehicle.speed,
                turn_rate: vehicle.turn_rate,
            },
            ControlZones(zones),
        ));
        model::insert_presence(&mut entity, vehicle.model.as_deref());
    }

    Ok(())
}
