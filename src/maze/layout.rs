//! Cell layout: turns a [`CellPlan`] into a cell node with its walls,
//! connectors and floor slabs.
//!
//! Every side of a cell is laid out in a side frame whose x axis runs along
//! the side and whose z axis points out of the cell. A wall segment sits with
//! its outer face on the cell boundary, so two cells joined through facing
//! connectors share a boundary line and never overlap.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
use std::iter;

use rand::prelude::*;

use super::config::LayoutConfig;
use super::node::{Maze, NodeId, NodeKind};
use crate::error::MazeError;
use crate::math::{Quat, Transform, Vec3};

/// Floors lower than this are treated as resting on the ground.
const GROUND_EPSILON: f32 = 1e-3;

/// What to build: kind, footprint and the wall kind requested for each side.
///
/// Sides are listed counter-clockwise seen from above, starting at +Z. A
/// `Transparent` side becomes a wall with a connector opening when it is long
/// enough, otherwise it is built solid. Missing entries are solid.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPlan {
    pub kind: NodeKind,
    /// Extent along x. For round cells, the circumscribed diameter.
    pub width: f32,
    /// Extent along z. For round cells, the circumscribed diameter.
    pub depth: f32,
    pub sides: Vec<NodeKind>,
}

impl CellPlan {
    /// A four-sided cell; sides in order +Z, +X, -Z, -X.
    pub fn quad(kind: NodeKind, width: f32, depth: f32, sides: [NodeKind; 4]) -> Self {
        Self {
            kind,
            width,
            depth,
            sides: sides.to_vec(),
        }
    }

    /// A regular polygon with one side per entry of `sides` (3 to 8).
    pub fn round(radius: f32, sides: Vec<NodeKind>) -> Self {
        Self {
            kind: NodeKind::Round,
            width: radius * 2.0,
            depth: radius * 2.0,
            sides,
        }
    }

    pub fn radius(&self) -> f32 {
        self.width * 0.5
    }
}

/// One straight side of a cell.
#[derive(Debug, Clone, Copy)]
struct Side {
    /// Maps side-frame axes into the cell frame; its forward is the outward normal.
    rotation: Quat,
    /// From the cell center to the outer face of the side.
    distance: f32,
    length: f32,
}

/// Number of sides a round plan is built with.
pub fn round_side_count(plan: &CellPlan) -> usize {
    plan.sides.len().clamp(3, 8)
}

/// Builds the cell described by `plan` under `parent`.
///
/// The cell is created detached: it knows its parent but is not listed among
/// the parent's children until the caller attaches it. `elevation` is the
/// world height of the cell floor and decides whether a support slab is laid.
///
/// # Errors
/// [`MazeError::UnknownNodeKind`] when `plan.kind` is not a cell kind. Nothing
/// is added to the maze in that case.
pub fn build_cell<R: Rng + ?Sized>(
    maze: &mut Maze,
    parent: NodeId,
    transform: Transform,
    plan: &CellPlan,
    layout: &LayoutConfig,
    elevation: f32,
    rng: &mut R,
) -> Result<NodeId, MazeError> {
    let height = layout.wall_height;
    let (sides, extent) = match plan.kind {
        NodeKind::Root | NodeKind::Room | NodeKind::Corridor | NodeKind::Challenge => (
            quad_sides(plan.width, plan.depth),
            Vec3::new(plan.width, height, plan.depth),
        ),
        NodeKind::Round => {
            let count = round_side_count(plan);
            let apothem = plan.radius() * (PI / count as f32).cos();
            // Interior square inside the inscribed circle; the walls cover the
            // rest of the polygon.
            let inner = apothem * std::f32::consts::SQRT_2;
            (
                round_sides(plan.radius(), count),
                Vec3::new(inner, height, inner),
            )
        }
        other => return Err(MazeError::UnknownNodeKind(other)),
    };

    let cell = maze.create_detached(parent, plan.kind, transform, extent);
    lay_floor(maze, cell, plan, layout, elevation);

    let kinds = plan
        .sides
        .iter()
        .copied()
        .chain(iter::repeat(NodeKind::Solid));
    for (side, kind) in sides.iter().zip(kinds) {
        lay_side(maze, cell, side, kind, layout, rng);
    }

    log::trace!(
        "laid out {:?} cell {} ({:.1} x {:.1}, {} sides)",
        plan.kind,
        cell.index(),
        plan.width,
        plan.depth,
        sides.len()
    );
    Ok(cell)
}

fn quad_sides(width: f32, depth: f32) -> Vec<Side> {
    (0..4)
        .map(|i| {
            let (distance, length) = if i % 2 == 0 {
                (depth * 0.5, width)
            } else {
                (width * 0.5, depth)
            };
            Side {
                rotation: Quat::from_rotation_y(i as f32 * FRAC_PI_2),
                distance,
                length,
            }
        })
        .collect()
}

fn round_sides(radius: f32, count: usize) -> Vec<Side> {
    let step = TAU / count as f32;
    let half = step * 0.5;
    let distance = radius * half.cos();
    let length = 2.0 * radius * half.sin();
    (0..count)
        .map(|i| Side {
            rotation: Quat::from_rotation_y(i as f32 * step + half),
            distance,
            length,
        })
        .collect()
}

/// Lays one side: a single solid wall, or two stubs around a connector.
fn lay_side<R: Rng + ?Sized>(
    maze: &mut Maze,
    cell: NodeId,
    side: &Side,
    kind: NodeKind,
    layout: &LayoutConfig,
    rng: &mut R,
) {
    let height = layout.wall_height;
    let thickness = layout.wall_thickness;
    let segment = |x: f32, length: f32| Transform {
        position: side.rotation.rotate(Vec3::new(
            x,
            height * 0.5,
            side.distance - thickness * 0.5,
        )),
        rotation: side.rotation,
        scale: Vec3::new(length, height, thickness),
    };

    let half = side.length * 0.5;
    if kind == NodeKind::Transparent && side.length >= layout.min_open_side() {
        let opening = layout.connector_width;
        let lead = rng.gen_range(layout.min_wall_stub..=side.length - opening - layout.min_wall_stub);
        let tail = side.length - opening - lead;

        maze.create_node(cell, NodeKind::Solid, segment(-half + lead * 0.5, lead));
        maze.create_node(
            cell,
            NodeKind::Transparent,
            segment(-half + lead + opening * 0.5, opening),
        );
        maze.create_node(cell, NodeKind::Solid, segment(half - tail * 0.5, tail));
    } else {
        maze.create_node(cell, NodeKind::Solid, segment(0.0, side.length));
    }
}

/// Lays the floor slab, then either a bevel (round cells) or a support slab
/// down to the ground when the floor is raised.
fn lay_floor(maze: &mut Maze, cell: NodeId, plan: &CellPlan, layout: &LayoutConfig, elevation: f32) {
    let thickness = layout.base_thickness;
    let (width, depth) = match plan.kind {
        NodeKind::Round => {
            let count = round_side_count(plan) as f32;
            let span = plan.width * (PI / count).cos();
            (span, span)
        }
        _ => (plan.width, plan.depth),
    };

    maze.create_node(
        cell,
        NodeKind::Base,
        Transform {
            position: Vec3::new(0.0, -thickness * 0.5, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::new(width, thickness, depth),
        },
    );

    if plan.kind == NodeKind::Round {
        maze.create_node(
            cell,
            NodeKind::Wedge,
            Transform {
                position: Vec3::new(0.0, -thickness * 1.5, 0.0),
                rotation: Quat::from_rotation_y(FRAC_PI_4),
                scale: Vec3::new(width, thickness, depth),
            },
        );
        return;
    }

    let gap = elevation - thickness;
    if gap > GROUND_EPSILON {
        maze.create_node(
            cell,
            NodeKind::Concrete,
            Transform {
                position: Vec3::new(0.0, -thickness - gap * 0.5, 0.0),
                rotation: Quat::IDENTITY,
                scale: Vec3::new(width, gap, depth),
            },
        );
    }
}
