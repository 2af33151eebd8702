//! Maze model and procedural growth.
//!
//! A maze is a tree of nodes owned by an arena ([`Maze`]). Top-level nodes are
//! cells (rooms, corridors, challenge rooms, round rooms); their children are
//! wall segments, connector openings and floor slabs placed by [`layout`].
//! [`generator`] grows the tree breadth-first from a root cell, rejecting any
//! cell whose volume would intersect an existing one.

pub mod config;
pub mod generator;
pub mod layout;
pub mod node;


pub use config::{ConnectorPick, GeneratorConfig, LayoutConfig};
pub use generator::{GenerationStats, MazeGenerator, generate};
pub use layout::{CellPlan, build_cell};
pub use node::{Maze, MazeNode, NodeId, NodeKind, NodeProperties};
