use super::quat::Quat;
use super::vec::Vec3;

/// Column-major 4x4 matrix: `self.0[column][row]`, translation in column 3.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
        Mat4([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation(q: Quat) -> Mat4 {
        let r = q.normalize().to_rotation_rows();
        Mat4([
            [r[0][0], r[1][0], r[2][0], 0.0],
            [r[0][1], r[1][1], r[2][1], 0.0],
            [r[0][2], r[1][2], r[2][2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Affine model matrix in translate * rotate * scale order.
    pub fn from_trs(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
        Mat4::translation(position.x(), position.y(), position.z())
            .multiply(&Mat4::rotation(rotation))
            .multiply(&Mat4::scaling(scale.x(), scale.y(), scale.z()))
    }

    /// Returns `self * b`.
    pub fn multiply(&self, b: &Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (i, column) in result.iter_mut().enumerate() {
            for (j, cell) in column.iter_mut().enumerate() {
                *cell = (0..4).map(|k| b.0[i][k] * self.0[k][j]).sum();
            }
        }
        Mat4(result)
    }

    /// Determinant of the upper-left 3x3 block. For affine matrices this is the
    /// determinant of the whole matrix.
    pub fn determinant(&self) -> f32 {
        let a = self.linear_rows();
        a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
            - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
            + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0])
    }

    /// Inverse of an affine matrix, `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Mat4> {
        let a = self.linear_rows();
        let t = self.translation_part();

        let det = self.determinant();
        if det.abs() < f32::EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let mut a_inv = [[0.0; 3]; 3];

        // Adjugate of A divided by the determinant
        a_inv[0][0] = (a[1][1] * a[2][2] - a[1][2] * a[2][1]) * inv_det;
        a_inv[0][1] = -(a[0][1] * a[2][2] - a[0][2] * a[2][1]) * inv_det;
        a_inv[0][2] = (a[0][1] * a[1][2] - a[0][2] * a[1][1]) * inv_det;
        a_inv[1][0] = -(a[1][0] * a[2][2] - a[1][2] * a[2][0]) * inv_det;
        a_inv[1][1] = (a[0][0] * a[2][2] - a[0][2] * a[2][0]) * inv_det;
        a_inv[1][2] = -(a[0][0] * a[1][2] - a[0][2] * a[1][0]) * inv_det;
        a_inv[2][0] = (a[1][0] * a[2][1] - a[1][1] * a[2][0]) * inv_det;
        a_inv[2][1] = -(a[0][0] * a[2][1] - a[0][1] * a[2][0]) * inv_det;
        a_inv[2][2] = (a[0][0] * a[1][1] - a[0][1] * a[1][0]) * inv_det;

        // -A⁻¹ * t
        let new_t = [
            -(a_inv[0][0] * t.x() + a_inv[0][1] * t.y() + a_inv[0][2] * t.z()),
            -(a_inv[1][0] * t.x() + a_inv[1][1] * t.y() + a_inv[1][2] * t.z()),
            -(a_inv[2][0] * t.x() + a_inv[2][1] * t.y() + a_inv[2][2] * t.z()),
        ];

        Some(Mat4([
            [a_inv[0][0], a_inv[1][0], a_inv[2][0], 0.0],
            [a_inv[0][1], a_inv[1][1], a_inv[2][1], 0.0],
            [a_inv[0][2], a_inv[1][2], a_inv[2][2], 0.0],
            [new_t[0], new_t[1], new_t[2], 1.0],
        ]))
    }

    /// Splits an affine matrix back into position, rotation and scale.
    ///
    /// A negative determinant is folded into the X scale. Returns `None` when the
    /// matrix is singular and no decomposition exists.
    pub fn decompose(&self) -> Option<(Vec3, Quat, Vec3)> {
        let det = self.determinant();
        if det.abs() < f32::EPSILON {
            return None;
        }

        let columns = [
            Vec3::new(self.0[0][0], self.0[0][1], self.0[0][2]),
            Vec3::new(self.0[1][0], self.0[1][1], self.0[1][2]),
            Vec3::new(self.0[2][0], self.0[2][1], self.0[2][2]),
        ];
        let mut sx = columns[0].length();
        let sy = columns[1].length();
        let sz = columns[2].length();
        if det < 0.0 {
            sx = -sx;
        }

        let c0 = columns[0] / sx;
        let c1 = columns[1] / sy;
        let c2 = columns[2] / sz;
        let rows = [
            [c0.x(), c1.x(), c2.x()],
            [c0.y(), c1.y(), c2.y()],
            [c0.z(), c1.z(), c2.z()],
        ];

        Some((
            self.translation_part(),
            Quat::from_rotation_rows(rows),
            Vec3::new(sx, sy, sz),
        ))
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.transform_vector(p) + self.translation_part()
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.0;
        Vec3::new(
            m[0][0] * v.x() + m[1][0] * v.y() + m[2][0] * v.z(),
            m[0][1] * v.x() + m[1][1] * v.y() + m[2][1] * v.z(),
            m[0][2] * v.x() + m[1][2] * v.y() + m[2][2] * v.z(),
        )
    }

    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.0[3][0], self.0[3][1], self.0[3][2])
    }

    fn linear_rows(&self) -> [[f32; 3]; 3] {
        let m = &self.0;
        [
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ]
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(matrix: [[f32; 4]; 4]) -> Self {
        Mat4(matrix)
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(matrix: Mat4) -> Self {
        matrix.0
    }
}
