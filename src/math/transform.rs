//! Position / rotation / scale transforms and conversions between local and
//! world space.
//!
//! A [`Transform`] is always interpreted relative to a parent. The world
//! placement of a maze node is the product of its ancestors' model matrices,
//! see [`crate::maze::Maze::world_matrix`].

use super::{Mat4, Quat, Vec3};
use crate::error::MazeError;

/// Affine transform in translate * rotate * scale order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Orientation relative to the parent. Kept normalized.
    pub rotation: Quat,
    /// Per-axis scale. Layout sub-parts store their size here.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Model matrix built as translate * rotate * scale.
    pub fn model(&self) -> Mat4 {
        Mat4::from_trs(self.position, self.rotation, self.scale)
    }

    /// Expresses this transform relative to `parent`.
    ///
    /// Computes `inverse(parent.model) * self.model` and decomposes the result.
    ///
    /// # Errors
    /// Returns [`MazeError::DegenerateTransform`] when either matrix is singular.
    pub fn local(&self, parent: &Transform) -> Result<Transform, MazeError> {
        let parent_model = parent.model();
        let inverse = parent_model
            .inverse()
            .ok_or(MazeError::DegenerateTransform {
                determinant: parent_model.determinant(),
            })?;
        Self::from_matrix(&inverse.multiply(&self.model()))
    }

    /// Decomposes an affine matrix back into a transform.
    ///
    /// # Errors
    /// Returns [`MazeError::DegenerateTransform`] for a singular matrix.
    pub fn from_matrix(matrix: &Mat4) -> Result<Transform, MazeError> {
        let (position, rotation, scale) =
            matrix
                .decompose()
                .ok_or(MazeError::DegenerateTransform {
                    determinant: matrix.determinant(),
                })?;
        Ok(Self::new(position, rotation, scale))
    }

    /// Places `child` (expressed relative to `self`) into the space `self` lives in.
    ///
    /// Exact as long as `self` has no non-uniform scale combined with a rotated
    /// child, which holds for maze cells (unit scale) and their sub-parts.
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation.rotate(child.position.scale_by(&self.scale)),
            rotation: (self.rotation * child.rotation).normalize(),
            scale: self.scale.scale_by(&child.scale),
        }
    }

    /// Local +X axis in the parent's space.
    pub fn right(&self) -> Vec3 {
        self.rotation.rotate(Vec3::X)
    }

    /// Local +Y axis in the parent's space.
    pub fn up(&self) -> Vec3 {
        self.rotation.rotate(Vec3::Y)
    }

    /// Local +Z axis in the parent's space. Connectors face along this axis.
    pub fn forward(&self) -> Vec3 {
        self.rotation.rotate(Vec3::Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn local_inverts_compose() {
        let parent = Transform::new(
            Vec3::new(5.0, 0.0, -3.0),
            Quat::from_rotation_y(0.6),
            Vec3::ONE,
        );
        let child = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(-1.2),
            Vec3::new(4.0, 1.0, 0.5),
        );

        let world = parent.compose(&child);
        let back = world.local(&parent).expect("parent is invertible");

        assert_abs_diff_eq!(back.position.x(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(back.position.y(), 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(back.position.z(), 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(back.scale.x(), 4.0, epsilon = 1e-4);
        assert_abs_diff_eq!(back.scale.z(), 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(back.rotation.angle_between(&child.rotation), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn compose_matches_matrix_product() {
        let parent = Transform::new(
            Vec3::new(-2.0, 1.0, 0.0),
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::ONE,
        );
        let child = Transform::from_position(Vec3::new(0.0, 0.0, 3.0));

        let composed = parent.compose(&child).model();
        let product = parent.model().multiply(&child.model());
        for c in 0..4 {
            for r in 0..4 {
                assert_abs_diff_eq!(composed.0[c][r], product.0[c][r], epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn local_against_flat_parent_is_degenerate() {
        let flat = Transform {
            scale: Vec3::new(1.0, 0.0, 1.0),
            ..Transform::IDENTITY
        };
        let err = Transform::IDENTITY.local(&flat).unwrap_err();
        assert!(matches!(err, MazeError::DegenerateTransform { .. }));
    }

    #[test]
    fn forward_follows_rotation() {
        let t = Transform::new(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2), Vec3::ONE);
        assert_abs_diff_eq!(t.forward().x(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(t.right().z(), -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(t.up().y(), 1.0, epsilon = 1e-5);
    }
}
