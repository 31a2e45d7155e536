//! A walled block of 60 by 60 units around a signalled ring road.
//!
//! Four roads cross the block at `x = ±12` and `z = ±12`,
//! forming a ring with an intersection at each corner.
//! The arms between the ring and the walls lead to the exit candidates.

use bevy_math::{Vec2, Vec3};
use math::Heading;

use crate::common_types::{
    approach_zone, bus_half_size, car_half_size, grounded, player_kinematics, signal_pole,
    stop_sign, tunnel_half_size,
};

const WALL_DISTANCE: f32 = 30.5;
const RING: f32 = 12.;
const OUTER_LANE: f32 = 13.5;
const INNER_LANE: f32 = 10.5;
/// Vehicles retarget 10 units before an anchor, so they must be stopped before that.
const ZONE_BEFORE_ANCHOR: f32 = 9.;

#[derive(Clone, Copy)]
struct Corner {
    name: &'static str,
    /// Unit signs of the corner coordinates.
    sign: Vec2,
}

const CORNERS: [Corner; 4] = [
    Corner { name: "sw", sign: Vec2::new(-1., -1.) },
    Corner { name: "nw", sign: Vec2::new(-1., 1.) },
    Corner { name: "ne", sign: Vec2::new(1., 1.) },
    Corner { name: "se", sign: Vec2::new(1., -1.) },
];

#[must_use]
pub fn file() -> store::File {
    store::File {
        meta:  store::Meta {
            id:          "blockdrive.city".into(),
            title:       "City Block".into(),
            description: "Find the tunnel out of a walled block with four signalled intersections."
                .into(),
            authors:     vec!["blockdrive".into()],
        },
        level: store::Level {
            environment: store::Environment { night: false },
            player:      store::Player {
                start:      store::Pose {
                    position: Vec3::new(-21., 0.5, -RING),
                    heading:  Heading::EAST,
                },
                half_size:  car_half_size(),
                kinematics: player_kinematics(),
            },
            walls:       walls(),
            buildings:   buildings(),
            stop_signs:  stop_signs(),
            signals:     signals(),
            paths:       paths(),
            vehicles:    vehicles(),
            pedestrians: pedestrians(),
            exits:       exits(),
        },
    }
}

fn walls() -> Vec<store::Obstacle> {
    let half_size = Vec3::new(WALL_DISTANCE + 0.5, 5., 0.5);
    vec![
        grounded("north wall", Vec2::new(0., WALL_DISTANCE), Heading::NORTH, half_size),
        grounded("south wall", Vec2::new(0., -WALL_DISTANCE), Heading::NORTH, half_size),
        grounded("east wall", Vec2::new(WALL_DISTANCE, 0.), Heading::EAST, half_size),
        grounded("west wall", Vec2::new(-WALL_DISTANCE, 0.), Heading::EAST, half_size),
    ]
}

fn buildings() -> Vec<store::Obstacle> {
    vec![
        grounded("tower", Vec2::new(-22., -22.), Heading::NORTH, Vec3::new(4., 5., 4.)),
        store::Obstacle {
            bounds: Some(store::BoundsOverride {
                scale:  Vec3::new(1.2, 1., 1.2),
                offset: Vec3::ZERO,
            }),
            ..grounded("hall", Vec2::new(22., -22.), Heading::NORTH, Vec3::new(2.5, 6., 2.5))
        },
        grounded("depot", Vec2::ZERO, Heading::NORTH, Vec3::new(3., 4., 3.)),
        store::Obstacle {
            bounds: Some(store::BoundsOverride {
                scale:  Vec3::new(1., 1., 0.8),
                offset: Vec3::new(0., 0., -1.),
            }),
            ..grounded("arcade", Vec2::new(22., 22.), Heading::EAST, Vec3::new(4., 4., 5.))
        },
        grounded("library", Vec2::new(-22., 22.), Heading::NORTH, Vec3::new(4., 5., 5.)),
        grounded("market", Vec2::new(0., 22.), Heading::NORTH, Vec3::new(6., 3., 4.)),
        grounded("school", Vec2::new(0., -22.), Heading::NORTH, Vec3::new(5., 4., 4.)),
        grounded("garage", Vec2::new(22., 0.), Heading::NORTH, Vec3::new(4., 3., 6.)),
        grounded("offices", Vec2::new(-22., 0.), Heading::NORTH, Vec3::new(4., 7., 5.)),
    ]
}

fn stop_signs() -> Vec<store::Obstacle> {
    vec![
        stop_sign("west arm", Vec2::new(-27., -RING - 3.5), Heading::EAST),
        stop_sign("south arm", Vec2::new(RING + 3.5, -27.), Heading::NORTH),
        stop_sign("east arm", Vec2::new(27., RING + 3.5), Heading::WEST),
        stop_sign("north arm", Vec2::new(-RING - 3.5, 27.), Heading::SOUTH),
    ]
}

fn signals() -> Vec<store::SignalGroup> {
    CORNERS
        .iter()
        .flat_map(|corner| {
            let center = corner.sign * RING;
            [
                store::SignalGroup {
                    name:   format!("{}-ns", corner.name),
                    phase:  store::Phase::A,
                    offset: 0.,
                    poles:  vec![signal_pole(
                        &format!("{} north-south", corner.name),
                        center + Vec2::new(3.5, -3.5),
                    )],
                },
                store::SignalGroup {
                    name:   format!("{}-ew", corner.name),
                    phase:  store::Phase::B,
                    offset: 0.,
                    poles:  vec![signal_pole(
                        &format!("{} east-west", corner.name),
                        center + Vec2::new(-3.5, 3.5),
                    )],
                },
            ]
        })
        .collect()
}

fn ring_anchors(lane: f32, corners: [usize; 4]) -> Vec<store::Anchor> {
    corners
        .into_iter()
        .map(|index| store::Anchor { position: CORNERS[index].sign * lane, heading: None })
        .collect()
}

fn paths() -> Vec<store::Path> {
    vec![
        store::Path {
            name:           "ring-outer".into(),
            // sw -> nw -> ne -> se
            anchors:        ring_anchors(OUTER_LANE, [0, 1, 2, 3]),
            topology:       store::Topology::Loop,
            restart_anchor: 0,
        },
        store::Path {
            name:           "ring-inner".into(),
            // sw -> se -> ne -> nw
            anchors:        ring_anchors(INNER_LANE, [0, 3, 2, 1]),
            topology:       store::Topology::Loop,
            restart_anchor: 0,
        },
        store::Path {
            name:           "plaza".into(),
            anchors:        [(-7., -7.), (7., -7.), (7., 7.), (-7., 7.)]
                .into_iter()
                .map(|(x, z)| store::Anchor { position: Vec2::new(x, z), heading: None })
                .collect(),
            topology:       store::Topology::Loop,
            restart_anchor: 0,
        },
        store::Path {
            name:           "north-sidewalk".into(),
            anchors:        [-8., 0., 8.]
                .into_iter()
                .map(|x| store::Anchor { position: Vec2::new(x, 16.5), heading: None })
                .collect(),
            topology:       store::Topology::BackAndForth,
            restart_anchor: 0,
        },
    ]
}

/// Zones in front of each intersection along a ring path.
///
/// `corners` lists the corner indices in traversal order.
fn ring_zones(lane: f32, corners: [usize; 4]) -> Vec<store::ControlZone> {
    (0..corners.len())
        .map(|leg| {
            let from = CORNERS[corners[leg]];
            let to = CORNERS[corners[(leg + 1) % corners.len()]];
            let travel = (to.sign - from.sign).normalize_or_zero();
            let axis = if travel.x == 0. { "ns" } else { "ew" };
            approach_zone(
                to.sign * lane,
                travel,
                ZONE_BEFORE_ANCHOR,
                &format!("{}-{axis}", to.name),
            )
        })
        .collect()
}

fn vehicles() -> Vec<store::Vehicle> {
    vec![
        store::Vehicle {
            label:        "taxi".into(),
            path:         "ring-outer".into(),
            start_anchor: 0,
            speed:        0.15,
            turn_rate:    0.05,
            half_size:    car_half_size(),
            altitude:     car_half_size().y,
            zones:        ring_zones(OUTER_LANE, [0, 1, 2, 3]),
            model:        Some("models/taxi.glb".into()),
        },
        store::Vehicle {
            label:        "bus".into(),
            path:         "ring-outer".into(),
            start_anchor: 2,
            speed:        0.1,
            turn_rate:    0.03,
            half_size:    bus_half_size(),
            altitude:     bus_half_size().y,
            zones:        ring_zones(OUTER_LANE, [0, 1, 2, 3]),
            model:        Some("models/bus.glb".into()),
        },
        store::Vehicle {
            label:        "van".into(),
            path:         "ring-inner".into(),
            start_anchor: 1,
            speed:        0.12,
            turn_rate:    0.05,
            half_size:    car_half_size(),
            altitude:     car_half_size().y,
            zones:        ring_zones(INNER_LANE, [0, 3, 2, 1]),
            model:        None,
        },
    ]
}

fn pedestrians() -> Vec<store::Pedestrian> {
    vec![
        store::Pedestrian {
            label:        "stroller".into(),
            path:         "plaza".into(),
            start_anchor: 0,
            speed:        1.2,
            altitude:     0.9,
            model:        Some("models/pedestrian.glb".into()),
        },
        store::Pedestrian {
            label:        "jogger".into(),
            path:         "north-sidewalk".into(),
            start_anchor: 1,
            speed:        2.5,
            altitude:     0.9,
            model:        None,
        },
    ]
}

fn exits() -> Vec<store::Exit> {
    let tunnel = |label: &str, planar: Vec2, heading: Heading| store::Exit {
        label: label.into(),
        pose: store::Pose { position: math::spatial(planar, tunnel_half_size().y), heading },
        half_size: tunnel_half_size(),
    };

    vec![
        tunnel("south", Vec2::new(RING, -WALL_DISTANCE), Heading::NORTH),
        tunnel("north", Vec2::new(-RING, WALL_DISTANCE), Heading::NORTH),
        tunnel("east", Vec2::new(WALL_DISTANCE, -RING), Heading::EAST),
        tunnel("west", Vec2::new(-WALL_DISTANCE, RING), Heading::EAST),
    ]
}

#[cfg(test)]
mod tests {
    use super::{CORNERS, INNER_LANE, OUTER_LANE, file, ring_zones};

    #[test]
    fn intersections_share_one_cycle() {
        let file = file();
        for group in &file.level.signals {
            assert_eq!(group.offset, 0., "{} is shifted against the other intersections", group.name);
        }
    }

    #[test]
    fn zones_reference_declared_signals() {
        let file = file();
        for vehicle in &file.level.vehicles {
            for zone in &vehicle.zones {
                assert!(
                    file.level.signals.iter().any(|group| group.name == zone.signal),
                    "{} references unknown signal {}",
                    vehicle.label,
                    zone.signal,
                );
            }
        }
    }

    #[test]
    fn zones_lie_on_their_lane() {
        for (lane, corners) in [(OUTER_LANE, [0, 1, 2, 3]), (INNER_LANE, [0, 3, 2, 1])] {
            for (leg, zone) in ring_zones(lane, corners).iter().enumerate() {
                let from = CORNERS[corners[leg]].sign * lane;
                let to = CORNERS[corners[(leg + 1) % 4]].sign * lane;
                let center = (zone.min + zone.max) / 2.;
                let along = (to - from).normalize();
                let across = (center - from).perp_dot(along).abs();
                assert!(across < 1e-4, "zone {leg} is off its lane by {across}");
                assert!(center.distance(to) > 10., "zone {leg} starts after retargeting");
            }
        }
    }

    #[test]
    fn paths_are_referenced() {
        let file = file();
        let referenced: Vec<_> = file
            .level
            .vehicles
            .iter()
            .map(|vehicle| &vehicle.path)
            .chain(file.level.pedestrians.iter().map(|pedestrian| &pedestrian.path))
            .collect();
        for path in &file.level.paths {
            assert!(referenced.contains(&&path.name), "path {} is unused", path.name);
        }
    }

    #[test]
    fn exits_sit_in_the_walls() {
        let file = file();
        assert_eq!(file.level.exits.len(), 4);
        for exit in &file.level.exits {
            let position = exit.pose.position;
            assert!(
                (position.x.abs().max(position.z.abs()) - super::WALL_DISTANCE).abs() < 1e-4,
                "exit {} is not on a wall",
                exit.label,
            );
        }
    }
}
