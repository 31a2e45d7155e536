use bevy_math::bounding::{Aabb3d, BoundingVolume};
use bevy_math::{Vec2, Vec3, Vec3A};

use crate::Heading;

#[cfg(test)]
mod tests;

/// Projects a world position onto the ground plane.
#[must_use]
pub fn planar(position: Vec3) -> Vec2 { Vec2::new(position.x, position.z) }

/// Lifts a ground plane position to the given altitude.
#[must_use]
pub fn spatial(planar: Vec2, y: f32) -> Vec3 { Vec3::new(planar.x, y, planar.y) }

/// Computes the axis-aligned bounds of a box yawed by `heading`.
///
/// `half_size` is measured in the object's local frame,
/// where the local Z axis points along the heading.
/// The returned box is the smallest AABB containing the rotated box.
#[must_use]
pub fn oriented_box_bounds(center: Vec3, heading: Heading, half_size: Vec3) -> Aabb3d {
    let (sin, cos) = heading.radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let world_half = Vec3::new(
        cos * half_size.x + sin * half_size.z,
        half_size.y,
        sin * half_size.x + cos * half_size.z,
    );
    Aabb3d::new(center, world_half)
}

/// A correction applied on top of computed bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsAdjust {
    /// Multiplier for the half size of the box, around its center.
    pub scale:  Vec3,
    /// Translation of the box center after scaling.
    pub offset: Vec3,
}

impl Default for BoundsAdjust {
    fn default() -> Self { Self { scale: Vec3::ONE, offset: Vec3::ZERO } }
}

impl BoundsAdjust {
    #[must_use]
    pub fn apply(self, bounds: Aabb3d) -> Aabb3d {
        let center = bounds.center() + Vec3A::from(self.offset);
        let half_size = bounds.half_size() * Vec3A::from(self.scale.abs());
        Aabb3d::new(center, half_size)
    }
}
