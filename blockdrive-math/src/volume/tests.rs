use bevy_math::Vec3;
use bevy_math::bounding::IntersectsVolume;

use super::{BoundsAdjust, oriented_box_bounds};
use crate::Heading;

fn assert_vec_eq(left: impl Into<Vec3>, right: Vec3, message: &str) {
    let left = left.into();
    assert!(left.abs_diff_eq(right, 1e-4), "{left} != {right}: {message}");
}

#[test]
fn unrotated_box_keeps_extents() {
    let bounds = oriented_box_bounds(Vec3::new(1., 2., 3.), Heading::NORTH, Vec3::new(1., 0.5, 2.));
    assert_vec_eq(bounds.min, Vec3::new(0., 1.5, 1.), "min corner");
    assert_vec_eq(bounds.max, Vec3::new(2., 2.5, 5.), "max corner");
}

#[test]
fn quarter_turn_swaps_horizontal_extents() {
    let bounds = oriented_box_bounds(Vec3::ZERO, Heading::EAST, Vec3::new(1., 0.5, 2.));
    assert_vec_eq(bounds.max, Vec3::new(2., 0.5, 1.), "x and z swap on a quarter turn");
}

#[test]
fn diagonal_box_grows() {
    let bounds = oriented_box_bounds(Vec3::ZERO, Heading::from_degrees(45.), Vec3::ONE);
    let expected = std::f32::consts::SQRT_2;
    assert_vec_eq(bounds.max, Vec3::new(expected, 1., expected), "unit square at 45 degrees");
}

#[test]
fn intersection_is_symmetric() {
    let pairs = [
        (Vec3::ZERO, Vec3::new(1.5, 0., 0.)),
        (Vec3::ZERO, Vec3::new(2., 0., 0.)),
        (Vec3::ZERO, Vec3::new(2.5, 0., 0.)),
        (Vec3::new(3., 0., 3.), Vec3::new(3.5, 1.9, 2.)),
    ];
    for (left, right) in pairs {
        let left = oriented_box_bounds(left, Heading::NORTH, Vec3::ONE);
        let right = oriented_box_bounds(right, Heading::from_degrees(30.), Vec3::ONE);
        assert_eq!(left.intersects(&right), right.intersects(&left), "{left:?} vs {right:?}");
    }
}

#[test]
fn touching_boxes_collide() {
    let left = oriented_box_bounds(Vec3::ZERO, Heading::NORTH, Vec3::ONE);
    let right = oriented_box_bounds(Vec3::new(2., 0., 0.), Heading::NORTH, Vec3::ONE);
    assert!(left.intersects(&right));
}

#[test]
fn separation_on_one_axis_suffices() {
    let left = oriented_box_bounds(Vec3::ZERO, Heading::NORTH, Vec3::ONE);
    let above = oriented_box_bounds(Vec3::new(0.5, 2.5, 0.5), Heading::NORTH, Vec3::ONE);
    assert!(!left.intersects(&above), "separated along Y only");
}

#[test]
fn adjust_scales_then_offsets() {
    let bounds = oriented_box_bounds(Vec3::new(10., 0., 0.), Heading::NORTH, Vec3::new(2., 1., 2.));
    let adjusted = BoundsAdjust { scale: Vec3::new(0.5, 1., 0.5), offset: Vec3::new(0., 0., -3.) }
        .apply(bounds);
    assert_vec_eq(adjusted.min, Vec3::new(9., -1., -4.), "min corner");
    assert_vec_eq(adjusted.max, Vec3::new(11., 1., -2.), "max corner");
}

#[test]
fn default_adjust_is_identity() {
    let bounds = oriented_box_bounds(Vec3::new(-4., 1., 7.), Heading::SOUTH, Vec3::new(3., 1., 5.));
    let adjusted = BoundsAdjust::default().apply(bounds);
    assert_vec_eq(adjusted.min, bounds.min.into(), "min corner");
    assert_vec_eq(adjusted.max, bounds.max.into(), "max corner");
}
