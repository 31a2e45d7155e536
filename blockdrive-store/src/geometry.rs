use bevy_math::Vec3;
use math::Heading;
use serde::{Deserialize, Serialize};

/// Position and facing of an object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Pose {
    /// World position of the object center.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 3]"))]
    pub position: Vec3,
    /// Yaw of the object.
    pub heading:  Heading,
}

/// A static box that blocks the player.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Obstacle {
    /// Label for debugging.
    #[serde(default)]
    pub label:     String,
    /// Center and yaw of the box.
    pub pose:      Pose,
    /// Half size of the box in its local frame.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 3]"))]
    pub half_size: Vec3,
    /// Correction applied to the computed bounds.
    #[serde(default)]
    pub bounds:    Option<BoundsOverride>,
}

/// Explicit correction of the bounds computed from an obstacle pose.
///
/// Used for models whose visual extent differs from their collision extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct BoundsOverride {
    /// Multiplier of the half size, applied around the box center.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 3]"))]
    pub scale:  Vec3,
    /// Translation of the box center after scaling.
    #[cfg_attr(feature = "schema", schemars(with = "[f32; 3]"))]
    pub offset: Vec3,
}

impl From<BoundsOverride> for math::BoundsAdjust {
    fn from(value: BoundsOverride) -> Self { Self { scale: value.scale, offset: value.offset } }
}
