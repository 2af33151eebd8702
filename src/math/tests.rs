//! Tests for the vector, quaternion and matrix primitives.

use super::*;
use approx::assert_abs_diff_eq;
use std::f32::consts::{FRAC_PI_2, PI};

fn assert_vec_eq(a: Vec3, b: Vec3) {
    assert_abs_diff_eq!(a.x(), b.x(), epsilon = 1e-4);
    assert_abs_diff_eq!(a.y(), b.y(), epsilon = 1e-4);
    assert_abs_diff_eq!(a.z(), b.z(), epsilon = 1e-4);
}

fn assert_mat_eq(a: &Mat4, b: &Mat4) {
    for c in 0..4 {
        for r in 0..4 {
            assert_abs_diff_eq!(a.0[c][r], b.0[c][r], epsilon = 1e-4);
        }
    }
}

#[test]
fn normalize_zero_vector_is_zero() {
    assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    assert_vec_eq(Vec3::new(3.0, 0.0, 4.0).normalize(), Vec3::new(0.6, 0.0, 0.8));
}

#[test]
fn rotation_y_maps_forward_onto_right() {
    let q = Quat::from_rotation_y(FRAC_PI_2);
    assert_vec_eq(q.rotate(Vec3::Z), Vec3::X);
    assert_vec_eq(q * Vec3::X, -Vec3::Z);
}

#[test]
fn quaternion_product_applies_right_operand_first() {
    let yaw = Quat::from_rotation_y(FRAC_PI_2);
    let pitch = Quat::from_axis_angle(Vec3::X, FRAC_PI_2);

    // pitch first sends +Z to -Y, yaw leaves -Y alone
    assert_vec_eq((yaw * pitch).rotate(Vec3::Z), -Vec3::Y);
    // yaw first sends +Z to +X, pitch leaves +X alone
    assert_vec_eq((pitch * yaw).rotate(Vec3::Z), Vec3::X);
}

#[test]
fn inverse_quaternion_undoes_rotation() {
    let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 1.1);
    let v = Vec3::new(-2.0, 0.5, 7.0);
    assert_vec_eq((q.inverse() * q).rotate(v), v);
    assert_abs_diff_eq!(q.angle_between(&q), 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(
        Quat::IDENTITY.angle_between(&Quat::from_rotation_y(PI)),
        PI,
        epsilon = 1e-3
    );
}

#[test]
fn trs_applies_scale_then_rotation_then_translation() {
    let m = Mat4::from_trs(
        Vec3::new(10.0, 0.0, 0.0),
        Quat::from_rotation_y(FRAC_PI_2),
        Vec3::new(2.0, 1.0, 1.0),
    );
    // (1,0,0) -> scaled (2,0,0) -> rotated (0,0,-2) -> translated
    assert_vec_eq(m.transform_point(Vec3::X), Vec3::new(10.0, 0.0, -2.0));
}

#[test]
fn inverse_times_matrix_is_identity() {
    let m = Mat4::from_trs(
        Vec3::new(1.0, -2.0, 3.5),
        Quat::from_axis_angle(Vec3::new(0.3, 1.0, -0.2), 0.7),
        Vec3::new(2.0, 0.5, 3.0),
    );
    let inverse = m.inverse().expect("invertible");
    assert_mat_eq(&m.multiply(&inverse), &Mat4::identity());
    assert_mat_eq(&inverse.multiply(&m), &Mat4::identity());
}

#[test]
fn singular_matrix_has_no_inverse_or_decomposition() {
    let flat = Mat4::scaling(1.0, 0.0, 1.0);
    assert!(flat.inverse().is_none());
    assert!(flat.decompose().is_none());
}

#[test]
fn decompose_recovers_trs() {
    let position = Vec3::new(4.0, 1.0, -6.0);
    let rotation = Quat::from_rotation_y(0.9);
    let scale = Vec3::new(3.0, 2.0, 5.0);
    let (p, r, s) = Mat4::from_trs(position, rotation, scale)
        .decompose()
        .expect("decomposable");
    assert_vec_eq(p, position);
    assert_vec_eq(s, scale);
    assert_abs_diff_eq!(r.angle_between(&rotation), 0.0, epsilon = 1e-3);
}

#[test]
fn decompose_flips_sign_of_improper_matrix() {
    let m = Mat4::scaling(-2.0, 1.0, 1.0);
    assert!(m.determinant() < 0.0);
    let (_, r, s) = m.decompose().expect("decomposable");
    assert_vec_eq(s, Vec3::new(-2.0, 1.0, 1.0));
    assert_abs_diff_eq!(r.angle_between(&Quat::IDENTITY), 0.0, epsilon = 1e-3);
}

#[test]
fn raw_components_match_axis_angle() {
    let half = FRAC_PI_2 * 0.5;
    let raw = Quat::from_xyzw(0.0, half.sin(), 0.0, half.cos());
    assert_abs_diff_eq!(raw.angle_between(&Quat::from_rotation_y(FRAC_PI_2)), 0.0, epsilon = 1e-3);
    assert_vec_eq(raw.rotate(Vec3::Z), Vec3::X);
}

#[test]
fn vectors_cast_to_flat_floats() {
    let points = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let flat: &[f32] = bytemuck::cast_slice(&points);
    assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}
