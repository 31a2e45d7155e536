use bevy_math::{Vec2, Vec3};
use math::Heading;

use crate::{
    Anchor, CodecError, ControlZone, Environment, Exit, File, Kinematics, Level, Meta, Obstacle,
    Path, Phase, Player, Pose, SignalGroup, Topology, Vehicle, decode, encode,
};

fn sample_file() -> File {
    File {
        meta:  Meta {
            id:          "sample".into(),
            title:       "Sample".into(),
            description: String::new(),
            authors:     vec![],
        },
        level: Level {
            environment: Environment { night: true },
            player:      Player {
                start:      Pose { position: Vec3::new(0., 0.5, -40.), heading: Heading::NORTH },
                half_size:  Vec3::new(1., 0.5, 2.),
                kinematics: Kinematics {
                    max_speed:    1.,
                    acceleration: 0.02,
                    turn_rate:    0.04,
                    drag:         0.97,
                },
            },
            walls:       vec![Obstacle {
                label:     "north".into(),
                pose:      Pose { position: Vec3::new(0., 2., 100.), heading: Heading::NORTH },
                half_size: Vec3::new(100., 2., 1.),
                bounds:    None,
            }],
            buildings:   vec![],
            stop_signs:  vec![],
            signals:     vec![SignalGroup {
                name:   "main".into(),
                phase:  Phase::B,
                offset: 1.5,
                poles:  vec![],
            }],
            paths:       vec![Path {
                name:           "loop".into(),
                anchors:        vec![
                    Anchor { position: Vec2::new(0., 0.), heading: None },
                    Anchor { position: Vec2::new(10., 0.), heading: Some(Heading::EAST) },
                ],
                topology:       Topology::BackAndForth,
                restart_anchor: 1,
            }],
            vehicles:    vec![Vehicle {
                label:        "taxi".into(),
                path:         "loop".into(),
                start_anchor: 0,
                speed:        0.5,
                turn_rate:    0.05,
                half_size:    Vec3::new(1., 0.5, 2.),
                altitude:     0.5,
                zones:        vec![ControlZone {
                    min:    Vec2::new(-1., -1.),
                    max:    Vec2::new(1., 1.),
                    signal: "main".into(),
                }],
                model:        Some("models/taxi.glb".into()),
            }],
            pedestrians: vec![],
            exits:       vec![Exit {
                label:     "east".into(),
                pose:      Pose { position: Vec3::new(100., 2., 0.), heading: Heading::EAST },
                half_size: Vec3::new(4., 2., 1.),
            }],
        },
    }
}

#[test]
fn encoded_file_decodes_to_same_content() {
    let mut buf = Vec::new();
    encode(&sample_file(), &mut buf).expect("encode into memory");
    let file = decode(&buf[..]).expect("decode encoded file");

    assert_eq!(file.meta.id, "sample");
    assert!(file.level.environment.night);
    assert_eq!(file.level.signals[0].phase, Phase::B);
    assert!((file.level.signals[0].offset - 1.5).abs() < f32::EPSILON);
    assert_eq!(file.level.paths[0].topology, Topology::BackAndForth);
    assert_eq!(file.level.paths[0].anchors[1].heading, Some(Heading::EAST));
    assert_eq!(file.level.vehicles[0].zones[0].signal, "main");
    assert_eq!(file.level.vehicles[0].model.as_deref(), Some("models/taxi.glb"));
    assert_eq!(file.level.player.kinematics, sample_file().level.player.kinematics);
}

#[test]
fn encoded_file_is_compressed() {
    let mut buf = Vec::new();
    encode(&sample_file(), &mut buf).expect("encode into memory");
    assert_eq!(&buf[..4], &[0x28, 0xb5, 0x2f, 0xfd], "zstd magic number");
}

#[test]
fn uncompressed_input_is_rejected() {
    let mut raw = Vec::new();
    ciborium::into_writer(&sample_file(), &mut raw).expect("encode into memory");
    assert!(matches!(decode(&raw[..]), Err(CodecError::Compression(_) | CodecError::Decode(_))));
}
