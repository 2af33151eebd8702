use std::ops::Mul;

use super::vec::Vec3;

/// Unit quaternion stored as `[x, y, z, w]`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Quat([f32; 4]);

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat([0.0, 0.0, 0.0, 1.0]);

    pub const fn from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Self {
        Quat([x, y, z, w])
    }

    /// Rotation of `angle_in_radians` around `axis` (normalized here).
    pub fn from_axis_angle(axis: Vec3, angle_in_radians: f32) -> Self {
        let axis = axis.normalize();
        let (s, c) = (angle_in_radians * 0.5).sin_cos();
        Quat([axis.x() * s, axis.y() * s, axis.z() * s, c])
    }

    /// Rotation around +Y. Maps +Z onto `(sin θ, 0, cos θ)`.
    pub fn from_rotation_y(angle_in_radians: f32) -> Self {
        Self::from_axis_angle(Vec3::Y, angle_in_radians)
    }

    /// Builds a quaternion from a pure rotation matrix given as `rows[row][col]`.
    pub fn from_rotation_rows(r: [[f32; 3]; 3]) -> Self {
        let trace = r[0][0] + r[1][1] + r[2][2];
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quat([
                (r[2][1] - r[1][2]) / s,
                (r[0][2] - r[2][0]) / s,
                (r[1][0] - r[0][1]) / s,
                0.25 * s,
            ])
        } else if r[0][0] > r[1][1] && r[0][0] > r[2][2] {
            let s = (1.0 + r[0][0] - r[1][1] - r[2][2]).sqrt() * 2.0;
            Quat([
                0.25 * s,
                (r[0][1] + r[1][0]) / s,
                (r[0][2] + r[2][0]) / s,
                (r[2][1] - r[1][2]) / s,
            ])
        } else if r[1][1] > r[2][2] {
            let s = (1.0 + r[1][1] - r[0][0] - r[2][2]).sqrt() * 2.0;
            Quat([
                (r[0][1] + r[1][0]) / s,
                0.25 * s,
                (r[1][2] + r[2][1]) / s,
                (r[0][2] - r[2][0]) / s,
            ])
        } else {
            let s = (1.0 + r[2][2] - r[0][0] - r[1][1]).sqrt() * 2.0;
            Quat([
                (r[0][2] + r[2][0]) / s,
                (r[1][2] + r[2][1]) / s,
                0.25 * s,
                (r[1][0] - r[0][1]) / s,
            ])
        };
        q.normalize()
    }

    /// Rotation matrix of this quaternion as `rows[row][col]`.
    pub fn to_rotation_rows(&self) -> [[f32; 3]; 3] {
        let [x, y, z, w] = self.0;
        [
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - z * w),
                2.0 * (x * z + y * w),
            ],
            [
                2.0 * (x * y + z * w),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - x * w),
            ],
            [
                2.0 * (x * z - y * w),
                2.0 * (y * z + x * w),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ]
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Falls back to identity for a zero quaternion.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::IDENTITY;
        }
        let [x, y, z, w] = self.0;
        Quat([x / length, y / length, z / length, w / length])
    }

    pub fn conjugate(&self) -> Self {
        let [x, y, z, w] = self.0;
        Quat([-x, -y, -z, w])
    }

    pub fn inverse(&self) -> Self {
        let length_squared = self.dot(self);
        if length_squared == 0.0 {
            return Self::IDENTITY;
        }
        let [x, y, z, w] = self.conjugate().0;
        Quat([
            x / length_squared,
            y / length_squared,
            z / length_squared,
            w / length_squared,
        ])
    }

    /// Rotates `v` by this (unit) quaternion.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x(), self.y(), self.z());
        let t = q.cross(&v) * 2.0;
        v + t * self.w() + q.cross(&t)
    }

    /// Angle of the shortest rotation between the two orientations, in radians.
    pub fn angle_between(&self, other: &Self) -> f32 {
        let d = self.normalize().dot(&other.normalize()).abs().min(1.0);
        2.0 * d.acos()
    }

    pub fn x(&self) -> f32 {
        self.0[0]
    }
    pub fn y(&self) -> f32 {
        self.0[1]
    }
    pub fn z(&self) -> f32 {
        self.0[2]
    }
    pub fn w(&self) -> f32 {
        self.0[3]
    }
}

/// Hamilton product; `a * b` applies `b` first, then `a`.
impl Mul for Quat {
    type Output = Self;

    fn mul(self, b: Self) -> Self {
        let [ax, ay, az, aw] = self.0;
        let [bx, by, bz, bw] = b.0;
        Quat([
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        ])
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        self.rotate(v)
    }
}

impl From<Quat> for [f32; 4] {
    fn from(q: Quat) -> Self {
        q.0
    }
}
