use bevy_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Obstacle, Path, Pedestrian, Pose, SignalGroup, Vehicle};

/// Contents of a map.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Level {
    /// Initial lighting of the map.
    #[serde(default)]
    pub environment: Environment,
    /// The player vehicle.
    pub player:      Player,
    /// Boundary walls, including the walls that host exit tunnels.
    pub walls:       Vec<Obstacle>,
    /// Buildings in the block.
    pub buildings:   Vec<Obstacle>,
    /// Stop signs at intersections.
    pub stop_signs:  Vec<Obstacle>,
    /// Traffic signal groups and their poles.
    pub signals:     Vec<SignalGroup>,
    /// Waypoint paths shared by vehicles and pedestrians.
    pub paths:       Vec<Path>,
    /// Autonomous vehicles, in ascending ordinal.
    ///
    /// The ordinal of a vehicle is its index in this list.
    pub vehicles:    Vec<Vehicle>,
    /// Pedestrians walking on the sidewalks.
    pub pedestrians: Vec<Pedestrian>,
    /// Candidate positions of the exit tunnel.
    ///
    /// One of them is chosen uniformly at random when the map is loaded.
    pub exits:       Vec<Exit>,
}

/// Lighting of the map.
#[derive(Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Environment {
    /// Whether the map starts at night.
    pub night: bool,
}

/// The player vehicle.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Player {
    /// Canonical start pose, also used for respawning after a collision.
    pub start:      Pose,
    /// Half size of the vehicle in its local frame.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 3]"))]
    pub half_size:  Vec3,
    /// Handling of the vehicle.
    pub kinematics: Kinematics,
}

/// Handling parameters of the player vehicle.
///
/// Rates are expressed per frame at 60 frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Kinematics {
    /// Maximum forward speed.
    /// The maximum reverse speed is half of this value.
    pub max_speed:    f32,
    /// Speed change per frame while accelerating or reversing.
    pub acceleration: f32,
    /// Heading change per frame in radians.
    pub turn_rate:    f32,
    /// Speed multiplier per frame while coasting.
    pub drag:         f32,
}

/// A candidate position of the exit tunnel.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Exit {
    /// Label for debugging.
    #[serde(default)]
    pub label:     String,
    /// Center and yaw of the tunnel mouth.
    pub pose:      Pose,
    /// Half size of the tunnel volume.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 3]"))]
    pub half_size: Vec3,
}
