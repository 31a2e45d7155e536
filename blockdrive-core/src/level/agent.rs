//! Placement of anything that occupies space in the block.

use bevy::ecs::component::Component;
use bevy::math::bounding::Aabb3d;
use bevy::math::{Vec2, Vec3};
use math::Heading;

/// Position and facing of an object.
///
/// This is the pose consumed by the presentation layer.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub heading:  Heading,
}

impl Pose {
    #[must_use]
    pub fn new(position: Vec3, heading: Heading) -> Self { Self { position, heading } }

    /// The position projected onto the ground plane.
    #[must_use]
    pub fn planar(&self) -> Vec2 { math::planar(self.position) }

    /// The axis-aligned bounds of a box of `extent` placed at this pose.
    #[must_use]
    pub fn bounds(&self, extent: &Extent) -> Aabb3d {
        math::oriented_box_bounds(self.position, self.heading, extent.half_size)
    }
}

impl From<store::Pose> for Pose {
    fn from(value: store::Pose) -> Self { Self { position: value.position, heading: value.heading } }
}

/// Half size of an object in its local frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub half_size: Vec3,
}
