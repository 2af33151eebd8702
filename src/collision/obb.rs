//! Oriented bounding boxes and the separating-axis intersection test.
//!
//! The growth algorithm uses [`intersects`] as its acceptance oracle: a prototype
//! cell is only attached when its box is disjoint from every placed cell.

use super::AABB;
use crate::math::{Transform, Vec3};

/// Axes shorter than this (squared length) come from parallel edges and are skipped.
const AXIS_EPSILON: f32 = 1e-6;

/// A box derived from a transform: unit cube scaled, rotated and translated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// The eight corners in the transform's parent space.
    pub vertices: [Vec3; 8],
    /// Rotated local +X.
    pub right: Vec3,
    /// Rotated local +Y.
    pub up: Vec3,
    /// Rotated local +Z.
    pub forward: Vec3,
    /// Axis-aligned bounds of `vertices`.
    pub bounds: AABB,
}

impl From<&Transform> for OrientedBox {
    fn from(transform: &Transform) -> Self {
        let half = Vec3::new(
            transform.scale.x().abs() * 0.5,
            transform.scale.y().abs() * 0.5,
            transform.scale.z().abs() * 0.5,
        );

        let mut vertices = [Vec3::ZERO; 8];
        for (i, vertex) in vertices.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            let corner = Vec3::new(sx * half.x(), sy * half.y(), sz * half.z());
            *vertex = transform.position + transform.rotation.rotate(corner);
        }

        Self {
            vertices,
            right: transform.right().normalize(),
            up: transform.up().normalize(),
            forward: transform.forward().normalize(),
            bounds: AABB::from_points(&vertices),
        }
    }
}

impl From<Transform> for OrientedBox {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}

impl OrientedBox {
    /// The three face axes in `right, up, forward` order.
    pub fn axes(&self) -> [Vec3; 3] {
        [self.right, self.up, self.forward]
    }

    /// Mean of the corners.
    pub fn center(&self) -> Vec3 {
        let sum = self
            .vertices
            .iter()
            .fold(Vec3::ZERO, |acc, vertex| acc + *vertex);
        sum / 8.0
    }

    /// Projects every corner on `axis` and returns the `(min, max)` interval.
    fn project(&self, axis: &Vec3) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|vertex| vertex.dot(axis))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), d| {
                (min.min(d), max.max(d))
            })
    }
}

/// Penetration details for two intersecting boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionInfo {
    /// Unit axis of least overlap, oriented from `a` towards `b`.
    pub axis: Vec3,
    /// Overlap along `axis`. Moving `a` by `-axis * depth` separates the boxes.
    pub depth: f32,
    /// `a` lies within `b` on every tested axis.
    pub a_in_b: bool,
    /// `b` lies within `a` on every tested axis.
    pub b_in_a: bool,
}

/// The 15 candidate axes: 3 face axes of `a`, 3 of `b`, then the 9 edge cross products.
fn candidate_axes(a: &OrientedBox, b: &OrientedBox) -> [Vec3; 15] {
    let a_axes = a.axes();
    let b_axes = b.axes();
    let mut axes = [Vec3::ZERO; 15];
    axes[..3].copy_from_slice(&a_axes);
    axes[3..6].copy_from_slice(&b_axes);
    for (i, a_axis) in a_axes.iter().enumerate() {
        for (j, b_axis) in b_axes.iter().enumerate() {
            axes[6 + i * 3 + j] = a_axis.cross(b_axis);
        }
    }
    axes
}

/// Separating-axis test. Returns `None` when some axis separates the boxes.
///
/// The boundary is closed: boxes that only touch are reported as intersecting
/// with a depth of zero. On equal overlap the first axis in candidate order wins.
pub fn intersection(a: &OrientedBox, b: &OrientedBox) -> Option<IntersectionInfo> {
    let mut best: Option<(Vec3, f32)> = None;
    let mut a_in_b = true;
    let mut b_in_a = true;

    for axis in candidate_axes(a, b) {
        if axis.length_squared() < AXIS_EPSILON {
            continue;
        }
        let axis = axis.normalize();

        let (a_min, a_max) = a.project(&axis);
        let (b_min, b_max) = b.project(&axis);

        // Comparing the union span against the summed lengths keeps parallel
        // faces stable where min/max of nearly equal floats would flicker.
        let union_span = a_max.max(b_max) - a_min.min(b_min);
        let summed_span = (a_max - a_min) + (b_max - b_min);
        if union_span > summed_span || a_max < b_min || b_max < a_min {
            return None;
        }

        a_in_b &= b_min <= a_min && a_max <= b_max;
        b_in_a &= a_min <= b_min && b_max <= a_max;

        let overlap = summed_span - union_span;
        if best.is_none_or(|(_, depth)| overlap < depth) {
            let towards_b = (b_min + b_max) - (a_min + a_max) >= 0.0;
            best = Some((if towards_b { axis } else { -axis }, overlap));
        }
    }

    best.map(|(axis, depth)| IntersectionInfo {
        axis,
        depth,
        a_in_b,
        b_in_a,
    })
}

/// `true` when the two boxes overlap or touch.
pub fn intersects(a: &OrientedBox, b: &OrientedBox) -> bool {
    intersection(a, b).is_some()
}
