//! Errors surfaced by maze generation.
//!
//! Only fatal conditions live here. Geometric conflicts during growth are
//! resolved internally (retry, then seal) and never reach the caller.

use std::fmt;

use crate::maze::NodeKind;

#[derive(Debug, Clone, PartialEq)]
pub enum MazeError {
    /// A kind outside `Root`, `Room`, `Corridor`, `Challenge`, `Round` reached
    /// the cell layout dispatcher.
    UnknownNodeKind(NodeKind),
    /// A transform matrix had a zero (or near-zero) determinant and could not
    /// be decomposed.
    DegenerateTransform { determinant: f32 },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNodeKind(kind) => {
                write!(f, "node kind {kind:?} cannot be laid out as a maze cell")
            }
            Self::DegenerateTransform { determinant } => write!(
                f,
                "transform cannot be decomposed: determinant {determinant} is degenerate"
            ),
        }
    }
}

impl std::error::Error for MazeError {}
