//! Intersection right-of-way.
//!
//! Each autonomous vehicle carries its own list of control zones,
//! authored per vehicle in the map.
//! A vehicle standing inside a zone whose signal is red does not move.

use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::math::{Rect, Vec2};

use super::signal;


/// An x-z rectangle straddling a stop line, controlled by a signal group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlZone {
    /// The zone on the ground plane, where `y` is the world Z coordinate.
    pub rect:   Rect,
    /// The [`signal::Group`] entity.
    pub signal: Entity,
}

/// The control zones of an autonomous vehicle.
#[derive(Component, Debug, Clone, Default)]
pub struct ControlZones(pub Vec<ControlZone>);

/// Whether an agent at `position` may move this frame.
///
/// Returns false iff the agent is inside some zone whose signal is red.
/// A signal that `lookup` cannot resolve is logged and treated as not red.
pub fn may_advance(
    position: Vec2,
    zones: &[ControlZone],
    lookup: impl Fn(Entity) -> Option<signal::Color>,
) -> bool {
    zones.iter().all(|zone| {
        if !zone.rect.contains(position) {
            return true;
        }

        match lookup(zone.signal) {
            Some(color) => color != signal::Color::Red,
            None => {
                bevy::log::error!("Control zone references unknown signal group {:?}", zone.signal);
                true
            }
        }
    })
}
