use std::collections::HashMap;
use std::time::Duration;

use bevy::ecs::entity::Entity;
use bevy::ecs::name::Name;
use bevy::ecs::world::World;

use super::{Color, Group, Pole};
use crate::level::collision;
use crate::load::{self, StoredEntity};

/// Spawns the signal groups declared in a map together with their poles.
pub fn spawn(world: &mut World, groups: &[store::SignalGroup]) -> load::Result<SignalMap> {
    let mut map = HashMap::new();

    for group in groups {
        let offset = Duration::try_from_secs_f32(group.offset)
            .map_err(|_| load::Error::InvalidValue("signal offset"))?;
        let group_entity = world
            .spawn((
                StoredEntity,
                Name::new(format!("Signal: {}", group.name)),
                Group { phase: group.phase.into(), offset, color: Color::Red },
            ))
            .id();

        for pole in &group.poles {
            let pole_entity =
                collision::loader::spawn_obstacle(world, pole, collision::ObstacleKind::SignalPole)?;
            world.entity_mut(pole_entity).insert(Pole { group: group_entity });
        }

        if map.insert(group.name.clone(), group_entity).is_some() {
            return Err(load::Error::DuplicateName { kind: "signal group", name: group.name.clone() });
        }
    }

    Ok(SignalMap(map))
}

pub struct SignalMap(HashMap<String, Entity>);

impl SignalMap {
    /// Resolves a named signal group reference.
    ///
    /// # Errors
    /// If the referenced group does not exist.
    pub fn resolve(&self, name: &str) -> load::Result<Entity> {
        self.0.get(name).copied().ok_or_else(|| load::Error::UnresolvedSignal(name.to_string()))
    }
}
