//! Collision primitives for maze placement.
//!
//! # Overview
//!
//! Every maze cell is approximated by an oriented box derived from its world
//! transform. Placement of a new cell is accepted only if its box is disjoint
//! from every box already in the maze.
//!
//! # Core Components
//!
//! * [`AABB`] - Axis-Aligned Bounding Box, the cheap broad-phase reject
//! * [`OrientedBox`] - Eight corners plus three local axes built from a [`Transform`](crate::math::Transform)
//! * [`intersects`] / [`intersection`] - 15-axis separating-axis test with optional penetration info
//!
//! # How the Test Works
//!
//! 1. The bounds of both boxes are compared; disjoint bounds mean disjoint boxes
//! 2. Otherwise the corners of both boxes are projected on 15 candidate axes
//! 3. Any axis whose projected intervals do not meet separates the boxes
//! 4. With no separating axis, the axis of least overlap is reported

mod aabb;
mod obb;

pub use aabb::AABB;
pub use obb::{IntersectionInfo, OrientedBox, intersection, intersects};

/// Broad phase followed by the separating-axis test.
pub fn boxes_overlap(a: &OrientedBox, b: &OrientedBox) -> bool {
    a.bounds.intersects(&b.bounds) && intersects(a, b)
}

#[cfg(test)]
mod tests;
