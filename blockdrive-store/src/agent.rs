use bevy_math::{Vec2, Vec3};
use math::Heading;
use serde::{Deserialize, Serialize};

/// An authored list of waypoints.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Path {
    /// Name referenced by vehicles and pedestrians.
    pub name:           String,
    /// Waypoints of the path, in traversal order.
    pub anchors:        Vec<Anchor>,
    /// How the path continues after the last anchor.
    pub topology:       Topology,
    /// The anchor that vehicles are moved to after an overlap with another vehicle.
    #[serde(default)]
    pub restart_anchor: usize,
}

/// A waypoint of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Anchor {
    /// Planar position, where `y` is the world Z coordinate.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 2]"))]
    pub position: Vec2,
    /// Facing of an agent placed on this anchor.
    ///
    /// Defaults to facing the next anchor.
    #[serde(default)]
    pub heading:  Option<Heading>,
}

/// Traversal order of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub enum Topology {
    /// The last anchor is followed by the first anchor.
    Loop,
    /// The traversal reverses at either end.
    BackAndForth,
}

/// An autonomous vehicle.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Vehicle {
    /// Label for debugging.
    pub label:        String,
    /// Name of the [`Path`] followed by the vehicle.
    pub path:         String,
    /// Index of the anchor the vehicle starts on.
    #[serde(default)]
    pub start_anchor: usize,
    /// Cruise speed per frame at 60 frames per second.
    pub speed:        f32,
    /// Maximum heading change per frame in radians.
    pub turn_rate:    f32,
    /// Half size of the vehicle in its local frame.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 3]"))]
    pub half_size:    Vec3,
    /// Altitude of the vehicle center.
    #[serde(default)]
    pub altitude:     f32,
    /// Intersection zones where the vehicle waits for the referenced signal.
    #[serde(default)]
    pub zones:        Vec<ControlZone>,
    /// Path of the visual model.
    ///
    /// The vehicle is absent from the simulation until the model is available.
    #[serde(default)]
    pub model:        Option<String>,
}

/// An x-z rectangle straddling a stop line.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ControlZone {
    /// Minimum corner, where `y` is the world Z coordinate.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 2]"))]
    pub min:    Vec2,
    /// Maximum corner, where `y` is the world Z coordinate.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 2]"))]
    pub max:    Vec2,
    /// Name of the [`SignalGroup`](crate::SignalGroup) controlling the zone.
    pub signal: String,
}

/// A pedestrian walking along a path.
///
/// A pedestrian on a path with a single anchor stands still on that anchor,
/// keeping its start heading while its animation keeps playing.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Pedestrian {
    /// Label for debugging.
    pub label:        String,
    /// Name of the [`Path`] walked by the pedestrian.
    ///
    /// Use a single-anchor path for a stationary pedestrian.
    pub path:         String,
    /// Index of the anchor the pedestrian starts on.
    #[serde(default)]
    pub start_anchor: usize,
    /// Walking speed in units per second.
    pub speed:        f32,
    /// Altitude of the pedestrian center.
    #[serde(default)]
    pub altitude:     f32,
    /// Path of the visual model.
    #[serde(default)]
    pub model:        Option<String>,
}
