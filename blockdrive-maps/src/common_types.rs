use bevy_math::{Vec2, Vec3};
use math::Heading;

/// Handling of the player car.
#[must_use]
pub fn player_kinematics() -> store::Kinematics {
    store::Kinematics { max_speed: 0.2, acceleration: 0.01, turn_rate: 0.03, drag: 0.98 }
}

#[must_use]
pub fn car_half_size() -> Vec3 { Vec3::new(1., 0.5, 2.) }

#[must_use]
pub fn bus_half_size() -> Vec3 { Vec3::new(1.25, 1.5, 4.) }

/// Exit tunnel mouth, 6 units wide and 5 units high.
#[must_use]
pub fn tunnel_half_size() -> Vec3 { Vec3::new(3., 2.5, 0.5) }

/// A box standing on the ground.
#[must_use]
pub fn grounded(label: &str, planar: Vec2, heading: Heading, half_size: Vec3) -> store::Obstacle {
    store::Obstacle {
        label: label.into(),
        pose: store::Pose { position: math::spatial(planar, half_size.y), heading },
        half_size,
        bounds: None,
    }
}

#[must_use]
pub fn signal_pole(label: &str, planar: Vec2) -> store::Obstacle {
    grounded(label, planar, Heading::NORTH, Vec3::new(0.15, 2., 0.15))
}

#[must_use]
pub fn stop_sign(label: &str, planar: Vec2, heading: Heading) -> store::Obstacle {
    grounded(label, planar, heading, Vec3::new(0.3, 1.2, 0.1))
}

/// A control zone covering the lane `travel` arrives on,
/// ending `before` units ahead of `anchor`.
///
/// `travel` must be an axis-aligned unit vector.
#[must_use]
pub fn approach_zone(anchor: Vec2, travel: Vec2, before: f32, signal: &str) -> store::ControlZone {
    const HALF_LENGTH: f32 = 2.;
    const HALF_WIDTH: f32 = 2.5;

    let center = anchor - travel * (before + HALF_LENGTH);
    let half = (travel * HALF_LENGTH).abs() + (travel.perp() * HALF_WIDTH).abs();
    store::ControlZone { min: center - half, max: center + half, signal: signal.into() }
}
