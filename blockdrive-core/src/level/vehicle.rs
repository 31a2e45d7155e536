//! Autonomous vehicles.
//!
//! A vehicle is an agent with a [`Follower`](super::follower::Follower),
//! optionally gated by [`ControlZones`](super::gate::ControlZones).

use bevy::ecs::component::Component;

pub mod loader;

/// Marks an autonomous vehicle.
#[derive(Component)]
pub struct Vehicle;

/// Order of a vehicle in the map.
///
/// When two vehicles overlap, the one with the lower ordinal is reset.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ordinal(pub u32);
