//! Separating-axis test coverage: symmetry, closed boundary, rotation invariance.

use super::*;
use crate::math::{Quat, Transform, Vec3};
use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::FRAC_PI_4;

fn cube(position: Vec3, size: f32) -> Transform {
    Transform::new(position, Quat::IDENTITY, Vec3::splat(size))
}

fn random_transform(rng: &mut StdRng) -> Transform {
    Transform::new(
        Vec3::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
        ),
        Quat::from_axis_angle(
            Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(0.1..1.0),
                rng.gen_range(-1.0..1.0),
            ),
            rng.gen_range(0.0..std::f32::consts::TAU),
        ),
        Vec3::new(
            rng.gen_range(0.5..4.0),
            rng.gen_range(0.5..4.0),
            rng.gen_range(0.5..4.0),
        ),
    )
}

/// Applies the same rigid rotation about the origin to a transform.
fn rotate_rigidly(t: &Transform, rotation: Quat) -> Transform {
    Transform::new(rotation.rotate(t.position), rotation * t.rotation, t.scale)
}

#[test]
fn test_sat_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let a = OrientedBox::from(random_transform(&mut rng));
        let b = OrientedBox::from(random_transform(&mut rng));
        assert_eq!(intersects(&a, &b), intersects(&b, &a));
    }
}

#[test]
fn test_separated_along_x() {
    // half extents 1 and 2
    let a = OrientedBox::from(cube(Vec3::ZERO, 2.0));
    let b = OrientedBox::from(cube(Vec3::new(3.5, 0.0, 0.0), 4.0));
    assert!(!intersects(&a, &b));
    assert!(!boxes_overlap(&a, &b));
}

#[test]
fn test_touching_boxes_intersect() {
    let a = OrientedBox::from(cube(Vec3::ZERO, 2.0));
    let b = OrientedBox::from(cube(Vec3::new(3.0, 0.0, 0.0), 4.0));
    let info = intersection(&a, &b).expect("touching faces intersect");
    assert_abs_diff_eq!(info.depth, 0.0, epsilon = 1e-6);
    assert!(boxes_overlap(&a, &b));
}

#[test]
fn test_rotation_invariance() {
    let overlapping = (
        cube(Vec3::new(1.0, 0.0, 0.0), 2.0),
        Transform::new(
            Vec3::new(2.2, 0.3, 0.5),
            Quat::from_rotation_y(0.4),
            Vec3::new(2.0, 1.0, 3.0),
        ),
    );
    let separated = (
        cube(Vec3::new(-3.0, 0.0, 0.0), 2.0),
        Transform::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_y(FRAC_PI_4),
            Vec3::new(2.0, 2.0, 2.0),
        ),
    );

    let rotations = [
        Quat::from_rotation_y(1.0),
        Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 2.3),
        Quat::from_axis_angle(Vec3::new(-0.2, 0.4, 1.0), -0.7),
    ];

    for rotation in rotations {
        for ((a, b), expected) in [(&overlapping, true), (&separated, false)] {
            let ra = OrientedBox::from(rotate_rigidly(a, rotation));
            let rb = OrientedBox::from(rotate_rigidly(b, rotation));
            assert_eq!(intersects(&ra, &rb), expected);
        }
    }
}

#[test]
fn test_bounds_overlap_but_boxes_do_not() {
    let diamond = |position| {
        Transform::new(position, Quat::from_rotation_y(FRAC_PI_4), Vec3::splat(2.0))
    };
    let a = OrientedBox::from(diamond(Vec3::ZERO));
    let b = OrientedBox::from(diamond(Vec3::new(1.5, 0.0, 1.5)));

    assert!(a.bounds.intersects(&b.bounds));
    assert!(!intersects(&a, &b));
    assert!(!boxes_overlap(&a, &b));
}

#[test]
fn test_minimum_translation_axis() {
    let a = OrientedBox::from(cube(Vec3::ZERO, 2.0));
    let b = OrientedBox::from(cube(Vec3::new(1.5, 0.0, 0.0), 2.0));
    let info = intersection(&a, &b).expect("overlapping");
    assert_abs_diff_eq!(info.depth, 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(info.axis.x(), 1.0, epsilon = 1e-5);
    assert!(!info.a_in_b && !info.b_in_a);

    let reversed = intersection(&b, &a).expect("overlapping");
    assert_abs_diff_eq!(reversed.axis.x(), -1.0, epsilon = 1e-5);
}

#[test]
fn test_containment_flags() {
    let small = OrientedBox::from(cube(Vec3::new(0.5, 0.0, 0.0), 1.0));
    let large = OrientedBox::from(cube(Vec3::ZERO, 4.0));
    let info = intersection(&small, &large).expect("contained box intersects");
    assert!(info.a_in_b);
    assert!(!info.b_in_a);
}

#[test]
fn test_box_corners_and_bounds() {
    let t = Transform::new(
        Vec3::new(10.0, 1.0, 0.0),
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        Vec3::new(4.0, 2.0, 2.0),
    );
    let obb = OrientedBox::from(&t);
    // the long axis now runs along Z
    assert_abs_diff_eq!(obb.bounds.size().x(), 2.0, epsilon = 1e-4);
    assert_abs_diff_eq!(obb.bounds.size().z(), 4.0, epsilon = 1e-4);
    assert_abs_diff_eq!(obb.center().x(), 10.0, epsilon = 1e-4);
    assert_abs_diff_eq!(obb.forward.x(), 1.0, epsilon = 1e-5);
}

#[test]
fn test_aabb_expand() {
    let mut bounds = AABB::new(Vec3::ZERO, Vec3::ONE);
    bounds.expand(&AABB::new(Vec3::new(-1.0, 0.5, 0.5), Vec3::new(0.0, 3.0, 0.5)));
    assert_eq!(bounds.min, Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 1.0));
}
