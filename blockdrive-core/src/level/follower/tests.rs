use std::f32::consts::PI;
use std::time::Duration;

use bevy::app::{self, App};
use bevy::ecs::entity::Entity;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::math::{Rect, Vec2, Vec3};
use bevy::time::{self, Time};
use math::Heading;

use super::{Follower, advance};
use crate::level::agent::Pose;
use crate::level::path::{Anchor, Cursor, Path, Topology};
use crate::level::{SystemSets, gate, model, signal};

const DT: f32 = 1. / 60.;

fn two_anchor_loop() -> Path {
    Path {
        anchors:        vec![
            Anchor { position: Vec2::new(0., 0.), heading: None },
            Anchor { position: Vec2::new(10., 0.), heading: None },
        ],
        topology:       Topology::Loop,
        restart_anchor: 0,
    }
}

fn assert_vec3(actual: Vec3, expected: Vec3) {
    assert!(actual.abs_diff_eq(expected, 1e-4), "{actual} != {expected}");
}

#[test]
fn exact_threshold_does_not_advance() {
    let path = two_anchor_loop();
    let cursor = Cursor { current: 0, target: 1, forward: true };
    let (pose, new_cursor) =
        advance(Pose::new(Vec3::ZERO, Heading::NORTH), cursor, &path, 1., PI, 10., DT);

    assert_eq!(new_cursor, cursor, "distance 10 is not below the threshold");
    assert!((pose.heading.radians() - Heading::EAST.radians()).abs() < 1e-4);
    assert_vec3(pose.position, Vec3::new(1., 0., 0.));
}

#[test]
fn arrival_retargets_before_steering() {
    let path = two_anchor_loop();
    let cursor = Cursor { current: 0, target: 1, forward: true };
    let (pose, new_cursor) =
        advance(Pose::new(Vec3::new(9.5, 0., 0.), Heading::EAST), cursor, &path, 0., 0.1, 10., DT);

    assert_eq!(new_cursor, Cursor { current: 1, target: 0, forward: true });
    let turned = Heading::EAST.closest_distance(pose.heading).abs();
    assert!((turned - 0.1).abs() < 1e-4, "turn is limited by turn rate, got {turned}");
}

#[test]
fn turns_the_shorter_way() {
    let path = Path {
        anchors:        vec![Anchor { position: Vec2::new(-100., 1.), heading: None }],
        topology:       Topology::Loop,
        restart_anchor: 0,
    };
    let cursor = Cursor { current: 0, target: 0, forward: true };
    // Facing slightly east of south, the target is almost due west.
    let start = Heading::from_degrees(170.);
    let (pose, _) = advance(Pose::new(Vec3::ZERO, start), cursor, &path, 0., 0.05, 1., DT);
    assert!(
        start.closest_distance(pose.heading) > 0.,
        "170 degrees to 270 degrees turns positively",
    );
}

#[test]
fn altitude_is_preserved() {
    let path = two_anchor_loop();
    let cursor = Cursor { current: 0, target: 1, forward: true };
    let (pose, _) =
        advance(Pose::new(Vec3::new(-20., 3., 0.), Heading::EAST), cursor, &path, 2., 0.1, 10., DT);
    assert!((pose.position.y - 3.).abs() < f32::EPSILON);
}

struct Setup {
    app:     App,
    vehicle: Entity,
}

fn setup(zone_color_phase: signal::Phase, ready: bool) -> Setup {
    let mut app = App::new();
    app.add_plugins((super::Plug::<()>::default(), signal::Plug::<()>::default()));
    app.configure_sets(app::Update, SystemSets::Signal.before(SystemSets::Follow));
    app.init_resource::<Time<time::Virtual>>();

    let path = app.world_mut().spawn(two_anchor_loop()).id();
    let group = app
        .world_mut()
        .spawn(signal::Group {
            phase:  zone_color_phase,
            offset: Duration::ZERO,
            color:  signal::Color::Red,
        })
        .id();

    let mut vehicle = app.world_mut().spawn((
        Pose::new(Vec3::new(-20., 0., 0.), Heading::EAST),
        Follower {
            path,
            cursor: Cursor { current: 0, target: 1, forward: true },
            speed: 1.,
            turn_rate: 0.1,
        },
        gate::ControlZones(vec![gate::ControlZone {
            rect:   Rect::new(-25., -5., -15., 5.),
            signal: group,
        }]),
    ));
    if ready {
        vehicle.insert(model::Ready);
    }
    let vehicle = vehicle.id();

    Setup { app, vehicle }
}

fn step(app: &mut App) {
    app.world_mut().resource_mut::<Time<time::Virtual>>().advance_by(Duration::from_secs_f32(DT));
    app.update();
}

fn pose(setup: &Setup) -> Pose {
    *setup.app.world().get::<Pose>(setup.vehicle).expect("vehicle has pose")
}

#[test]
fn red_zone_freezes_pose() {
    let mut setup = setup(signal::Phase::B, true);
    let before = pose(&setup);
    for _ in 0..10 {
        step(&mut setup.app);
    }
    assert_eq!(pose(&setup), before, "phase B is red at the start of the cycle");
}

#[test]
fn green_zone_moves() {
    let mut setup = setup(signal::Phase::A, true);
    step(&mut setup.app);
    assert!(pose(&setup).position.x > -20., "phase A is green at the start of the cycle");
}

#[test]
fn absent_vehicle_is_skipped() {
    let mut setup = setup(signal::Phase::A, false);
    let before = pose(&setup);
    step(&mut setup.app);
    assert_eq!(pose(&setup), before);
}
