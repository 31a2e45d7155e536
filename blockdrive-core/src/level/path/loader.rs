use std::collections::HashMap;

use bevy::ecs::entity::Entity;
use bevy::ecs::name::Name;
use bevy::ecs::world::World;

use super::{Anchor, Cursor, Path};
use crate::load::{self, StoredEntity};

/// Spawns the named paths declared in a map.
pub fn spawn(world: &mut World, paths: &[store::Path]) -> load::Result<PathMap> {
    let mut map = HashMap::new();

    for path in paths {
        if path.anchors.is_empty() {
            return Err(load::Error::EmptyPath(path.name.clone()));
        }
        if path.restart_anchor >= path.anchors.len() {
            return Err(load::Error::AnchorOutOfRange {
                path:  path.name.clone(),
                index: path.restart_anchor,
            });
        }
        if !path.anchors.iter().all(|anchor| anchor.position.is_finite()) {
            return Err(load::Error::NonFiniteFloat("path anchor"));
        }

        let entity = world
            .spawn((
                StoredEntity,
                Name::new(format!("Path: {}", path.name)),
                Path {
                    anchors:        path
                        .anchors
                        .iter()
                        .map(|anchor| Anchor { position: anchor.position, heading: anchor.heading })
                        .collect(),
                    topology:       path.topology.into(),
                    restart_anchor: path.restart_anchor,
                },
            ))
            .id();

        if map.insert(path.name.clone(), entity).is_some() {
            return Err(load::Error::DuplicateName { kind: "path", name: path.name.clone() });
        }
    }

    Ok(PathMap(map))
}

pub struct PathMap(HashMap<String, Entity>);

impl PathMap {
    /// Resolves a named path reference.
    ///
    /// # Errors
    /// If the referenced path does not exist.
    pub fn resolve(&self, name: &str) -> load::Result<Entity> {
        self.0.get(name).copied().ok_or_else(|| load::Error::UnresolvedPath(name.to_string()))
    }

    /// Resolves a path and places a cursor on its anchor `start`.
    ///
    /// # Errors
    /// If the referenced path does not exist or has no such anchor.
    pub fn place(&self, world: &World, name: &str, start: usize) -> load::Result<Placement> {
        let entity = self.resolve(name)?;
        let path = world
            .get::<Path>(entity)
            .ok_or_else(|| load::Error::UnresolvedPath(name.to_string()))?;
        let anchor = path
            .anchor(start)
            .ok_or_else(|| load::Error::AnchorOutOfRange { path: name.to_string(), index: start })?;
        let cursor = path.cursor_at(start);
        Ok(Placement { path: entity, cursor, anchor: *anchor, heading: path.facing(cursor) })
    }
}

/// An agent placed on a path anchor.
pub struct Placement {
    pub path:    Entity,
    pub cursor:  Cursor,
    pub anchor:  Anchor,
    pub heading: math::Heading,
}
