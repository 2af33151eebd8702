//! Math utilities and types for the maze geometry.
//!
//! This module provides vector, quaternion and matrix types and operations. All
//! types are plain-old-data
//! (`bytemuck::Pod`) so a generated maze can be uploaded to GPU buffers by a
//! downstream world builder without conversion.
//!
//! # Module Organization
//!
//! - [`vec`] module contains all vector operations (re-exported at root level)
//! - [`quat`] module contains quaternion composition and rotation
//! - [`mat`] module contains all matrix operations (re-exported at root level)
//! - [`transform`] module composes position/rotation/scale and converts between
//!   local and world space

pub mod mat;
pub mod quat;
pub mod transform;
pub mod vec;

pub use mat::Mat4;
pub use quat::Quat;
pub use transform::Transform;
pub use vec::Vec3;

#[cfg(test)]
mod tests;
