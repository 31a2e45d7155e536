//! Heading arithmetic and bounding volume helpers.
//!
//! World coordinates follow the usual Y-up convention.
//! All ground-level navigation happens on the X-Z plane,
//! which is represented by [`Vec2`](bevy_math::Vec2) values where `y` holds the world Z coordinate.

mod heading;
pub use heading::{Heading, wrap_signed};

mod volume;
pub use volume::{BoundsAdjust, oriented_box_bounds, planar, spatial};

/// Reference frame rate that per-frame tunables are expressed in.
///
/// Speeds, accelerations and turn rates of agents are authored as "per frame at 60 Hz",
/// and multiplied by `dt * FRAME_RATE` to stay independent of the actual frame rate.
pub const FRAME_RATE: f32 = 60.;

/// Converts a real time delta into the number of reference frames it spans.
#[must_use]
pub fn reference_frames(dt_secs: f32) -> f32 { dt_secs * FRAME_RATE }
