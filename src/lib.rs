//! Mazegrow - procedural 3D maze growth
//!
//! Grows a maze of rooms, corridors, challenge rooms and round rooms from a
//! single root cell. Cells are attached breadth-first through connector
//! openings in their walls; a new cell is kept only when its oriented volume
//! stays clear of every cell already placed.
//!
//! # Architecture
//! - `math/`: vectors, quaternions, matrices and the [`math::Transform`] hierarchy
//! - `collision/`: oriented boxes and the 15-axis separating-axis test
//! - `maze/`: the node arena, cell layout rules and the growth algorithm
//! - `profiling/`: timers and reports for generation phases
//!
//! # Usage
//! ```rust
//! use mazegrow::maze::{GeneratorConfig, generate};
//!
//! let maze = generate(Some(7), &GeneratorConfig::default()).expect("generation");
//! assert!(!maze.cells().is_empty());
//! ```

pub mod collision;
pub mod error;
pub mod math;
pub mod maze;
pub mod profiling;

pub use error::MazeError;
pub use maze::{GeneratorConfig, Maze, MazeGenerator, generate};
