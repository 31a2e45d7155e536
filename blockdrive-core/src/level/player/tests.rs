use std::time::Duration;

use bevy::app::{self, App};
use bevy::ecs::entity::Entity;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::math::Vec3;
use bevy::time::{self, Time};
use math::Heading;

use super::{Controls, Kinematics, Player, StartPose, step};
use crate::level::agent::{Extent, Pose};
use crate::level::collision::{Exit, Obstacle, ObstacleKind};
use crate::level::session::{self, Session};
use crate::level::{SystemSets, collision};

const DT: f32 = 1. / 60.;

fn kinematics(speed: f32) -> Kinematics {
    Kinematics { speed, max_speed: 0.2, acceleration: 0.01, turn_rate: 0.03, drag: 0.98 }
}

fn forward() -> Controls { Controls { forward: true, ..Default::default() } }

#[test]
fn accelerates_up_to_max_speed() {
    let pose = Pose::new(Vec3::ZERO, Heading::NORTH);
    let (speed, proposed) = step(forward(), &kinematics(0.), pose, DT);
    assert!((speed - 0.01).abs() < 1e-6);
    assert!(proposed.position.abs_diff_eq(Vec3::new(0., 0., 0.01), 1e-6));

    let (speed, _) = step(forward(), &kinematics(0.195), pose, DT);
    assert!((speed - 0.2).abs() < 1e-6);
}

#[test]
fn reverse_is_capped_at_half_max_speed() {
    let controls = Controls { reverse: true, ..Default::default() };
    let (speed, _) = step(controls, &kinematics(-0.095), Pose::default(), DT);
    assert!((speed + 0.1).abs() < 1e-6);
}

#[test]
fn coasting_applies_drag_per_reference_frame() {
    let (speed, _) = step(Controls::default(), &kinematics(0.1), Pose::default(), 2. * DT);
    assert!((speed - 0.1 * 0.98 * 0.98).abs() < 1e-6);
}

#[test]
fn steering_needs_speed() {
    let controls = Controls { left: true, ..Default::default() };
    let (_, proposed) = step(controls, &kinematics(0.), Pose::default(), DT);
    assert_eq!(proposed.heading, Heading::NORTH);
}

#[test]
fn reverse_steering_is_mirrored() {
    let left_forward = Controls { left: true, forward: true, ..Default::default() };
    let (_, proposed) = step(left_forward, &kinematics(0.1), Pose::default(), DT);
    assert!((Heading::NORTH.closest_distance(proposed.heading) - 0.03).abs() < 1e-6);

    let left_reverse = Controls { left: true, reverse: true, ..Default::default() };
    let (_, proposed) = step(left_reverse, &kinematics(-0.05), Pose::default(), DT);
    assert!((Heading::NORTH.closest_distance(proposed.heading) + 0.03).abs() < 1e-6);
}

struct Setup {
    app:    App,
    player: Entity,
}

fn start_pose() -> Pose { Pose::new(Vec3::new(0., 0.5, 0.), Heading::NORTH) }

fn setup(player_pose: Pose) -> Setup {
    let mut app = App::new();
    app.add_plugins((
        super::Plug,
        session::Plug::<()>::default(),
        collision::Plug::<()>::default(),
    ));
    app.configure_sets(app::Update, SystemSets::Session.before(SystemSets::Player));
    app.init_resource::<Time<time::Virtual>>();

    let world = app.world_mut();
    world.spawn((
        Obstacle { kind: ObstacleKind::Wall },
        Pose::new(Vec3::new(0., 5., 25.5), Heading::NORTH),
        Extent { half_size: Vec3::new(26., 5., 0.5) },
    ));
    world.spawn((
        Exit,
        Pose::new(Vec3::new(15., 2.5, 25.5), Heading::NORTH),
        Extent { half_size: Vec3::new(3., 2.5, 0.5) },
    ));
    let player = world
        .spawn((
            Player,
            player_pose,
            StartPose(start_pose()),
            Extent { half_size: Vec3::new(1., 0.5, 2.) },
            kinematics(0.2),
        ))
        .id();

    {
        let mut session = world.resource_mut::<Session>();
        session.started = true;
        session.collision_checks_enabled = true;
    }
    world.resource_mut::<Controls>().forward = true;

    Setup { app, player }
}

fn update(setup: &mut Setup) {
    setup
        .app
        .world_mut()
        .resource_mut::<Time<time::Virtual>>()
        .advance_by(Duration::from_secs_f32(DT));
    setup.app.update();
}

#[test]
fn free_move_is_committed() {
    let mut setup = setup(start_pose());
    update(&mut setup);

    let pose = setup.app.world().get::<Pose>(setup.player).expect("pose");
    assert!(pose.position.abs_diff_eq(Vec3::new(0., 0.5, 0.2), 1e-6));
    assert!(!setup.app.world().resource::<Session>().collided);
}

#[test]
fn collision_respawns_at_exact_start_pose() {
    let mut setup = setup(Pose::new(Vec3::new(0., 0.5, 22.9), Heading::NORTH));
    update(&mut setup);

    let world = setup.app.world();
    assert_eq!(*world.get::<Pose>(setup.player).expect("pose"), start_pose());
    assert!(world.get::<Kinematics>(setup.player).expect("kinematics").speed.abs() < f32::EPSILON);
    assert!(world.resource::<Session>().collided);
    assert!(!world.resource::<Session>().won);
}

#[test]
fn exit_inside_wall_still_collides() {
    let mut setup = setup(Pose::new(Vec3::new(15., 0.5, 22.9), Heading::NORTH));
    update(&mut setup);

    let world = setup.app.world();
    assert!(world.resource::<Session>().won);
    assert!(world.resource::<Session>().collided);
    assert_eq!(*world.get::<Pose>(setup.player).expect("pose"), start_pose());
}

#[test]
fn open_exit_commits_the_move() {
    let before = Pose::new(Vec3::new(-15., 0.5, 2.9), Heading::NORTH);
    let mut setup = setup(before);
    setup.app.world_mut().spawn((
        Exit,
        Pose::new(Vec3::new(-15., 2.5, 5.), Heading::NORTH),
        Extent { half_size: Vec3::new(3., 2.5, 0.5) },
    ));
    update(&mut setup);

    let world = setup.app.world();
    assert!(world.resource::<Session>().won);
    assert!(!world.resource::<Session>().collided);
    let pose = world.get::<Pose>(setup.player).expect("pose");
    assert!(pose.position.abs_diff_eq(Vec3::new(-15., 0.5, 3.1), 1e-5));
}

#[test]
fn player_is_frozen_before_start() {
    let mut setup = setup(start_pose());
    setup.app.world_mut().resource_mut::<Session>().started = false;
    update(&mut setup);

    assert_eq!(*setup.app.world().get::<Pose>(setup.player).expect("pose"), start_pose());
}
