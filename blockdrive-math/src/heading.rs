use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::{fmt, ops};

use bevy_math::{Vec2, Vec3};


/// Normalizes an angle difference into the range `-PI..=PI`.
///
/// Values already in range are returned unchanged,
/// so applying this function repeatedly yields the same result.
#[must_use]
pub fn wrap_signed(radians: f32) -> f32 {
    if (-PI..=PI).contains(&radians) {
        return radians;
    }

    (radians + PI).rem_euclid(TAU) - PI
}

/// The yaw of an object on the X-Z plane.
///
/// A heading of `h` moves forward along `(sin h, cos h)` in `(x, z)`,
/// i.e. zero faces +Z and a quarter turn faces +X.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Heading(
    f32, // always 0 <= heading < TAU
);

impl Heading {
    /// Facing +Z.
    pub const NORTH: Self = Self(0.);
    /// Facing +X.
    pub const EAST: Self = Self(FRAC_PI_2);
    /// Facing -Z.
    pub const SOUTH: Self = Self(PI);
    /// Facing -X.
    pub const WEST: Self = Self(FRAC_PI_2 * 3.);

    /// Creates a heading from an arbitrary angle in radians.
    #[must_use]
    pub fn from_radians(radians: f32) -> Self {
        let wrapped = radians.rem_euclid(TAU);
        // rem_euclid rounds tiny negative inputs up to exactly TAU.
        if wrapped >= TAU { Self(0.) } else { Self(wrapped) }
    }

    /// Creates a heading from an angle in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self { Self::from_radians(degrees.to_radians()) }

    /// Returns the heading of a planar vector, where `vec.y` is the world Z component.
    ///
    /// Returns `NORTH` for a zero vector.
    #[must_use]
    pub fn from_planar(vec: Vec2) -> Self { Self::from_radians(vec.x.atan2(vec.y)) }

    /// Returns the heading in radians in the range `0..TAU`.
    #[must_use]
    pub fn radians(self) -> f32 { self.0 }

    /// Returns the heading in degrees in the range `0..360`.
    #[must_use]
    pub fn degrees(self) -> f32 { self.0.to_degrees() }

    /// The unit vector on the X-Z plane that this heading faces.
    #[must_use]
    pub fn forward(self) -> Vec2 {
        let (sin, cos) = self.0.sin_cos();
        Vec2::new(sin, cos)
    }

    /// Same as [`forward`](Self::forward), embedded in world space.
    #[must_use]
    pub fn forward_3d(self) -> Vec3 {
        let forward = self.forward();
        Vec3::new(forward.x, 0., forward.y)
    }

    /// Returns the signed angle closest to zero such that
    /// adding it to `self` yields `other`.
    ///
    /// The result is always in the range `-PI..=PI`.
    #[must_use]
    pub fn closest_distance(self, other: Heading) -> f32 { wrap_signed(other.0 - self.0) }

    /// Turns towards `desired` the shorter way, by no more than `max_turn` radians.
    ///
    /// `max_turn` must be non-negative.
    #[must_use]
    pub fn restricted_turn(self, desired: Heading, max_turn: f32) -> Self {
        self + self.closest_distance(desired).clamp(-max_turn, max_turn)
    }
}

impl Default for Heading {
    fn default() -> Self { Self::NORTH }
}

impl From<f32> for Heading {
    fn from(radians: f32) -> Self { Self::from_radians(radians) }
}

impl From<Heading> for f32 {
    fn from(heading: Heading) -> f32 { heading.0 }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for Heading {
    fn schema_name() -> std::borrow::Cow<'static, str> { "Heading".into() }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        <f32 as schemars::JsonSchema>::json_schema(generator)
    }
}

impl fmt::Debug for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heading")
            .field("radians", &self.radians())
            .field("degrees", &self.degrees())
            .finish()
    }
}

impl ops::Add<f32> for Heading {
    type Output = Self;
    /// Rotates `self` by `radians`, positive towards +X from +Z.
    fn add(self, radians: f32) -> Self { Self::from_radians(self.0 + radians) }
}

impl ops::AddAssign<f32> for Heading {
    fn add_assign(&mut self, radians: f32) { *self = *self + radians; }
}

impl ops::Sub<f32> for Heading {
    type Output = Self;
    fn sub(self, radians: f32) -> Self { self + (-radians) }
}

impl ops::SubAssign<f32> for Heading {
    fn sub_assign(&mut self, radians: f32) { *self = *self - radians; }
}

/// Returns the shortest signed rotation such that adding it to `other` yields `self`.
impl ops::Sub for Heading {
    type Output = f32;
    fn sub(self, other: Self) -> f32 { other.closest_distance(self) }
}
