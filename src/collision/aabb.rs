use crate::math::Vec3;

/// Axis-Aligned Bounding Box (AABB) used as the broad phase of the placement test.
///
/// An AABB is a rectangular box whose faces are aligned with the world coordinate axes.
/// It is defined by two points: the minimum and maximum corners. Every
/// [`OrientedBox`](super::OrientedBox) carries the AABB of its corners so that
/// far-apart cells can be rejected with 6 comparisons before running the full
/// separating-axis test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Creates a new AABB from minimum and maximum corner points.
    ///
    /// # Example
    /// ```
    /// use mazegrow::collision::AABB;
    /// use mazegrow::math::Vec3;
    ///
    /// let bbox = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(bbox.center(), Vec3::new(0.5, 1.0, 1.5));
    /// ```
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates the smallest AABB containing every point.
    ///
    /// For each dimension (x, y, z), the minimum and maximum over all points
    /// define the box. An empty slice yields a degenerate box at the origin.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(Vec3::ZERO, Vec3::ZERO);
        };
        let mut bounds = Self::new(*first, *first);
        for point in &points[1..] {
            bounds.min = bounds.min.min(point);
            bounds.max = bounds.max.max(point);
        }
        bounds
    }

    /// Expands this AABB to fully contain another AABB.
    pub fn expand(&mut self, other: &AABB) {
        self.min = self.min.min(&other.min);
        self.max = self.max.max(&other.max);
    }

    /// Checks if this AABB intersects with another AABB.
    ///
    /// Two AABBs intersect if they overlap on all three axes (x, y, z).
    /// Touching faces count as an intersection, matching the closed boundary
    /// of the oriented-box test.
    pub fn intersects(&self, other: &AABB) -> bool {
        let (a_min, a_max) = (self.min.as_array(), self.max.as_array());
        let (b_min, b_max) = (other.min.as_array(), other.max.as_array());
        for i in 0..3 {
            if a_max[i] < b_min[i] || a_min[i] > b_max[i] {
                return false;
            }
        }
        true
    }

    /// Calculates the center point of the AABB: `(min + max) * 0.5` per axis.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size of the box along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}
