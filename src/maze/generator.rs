//! Maze growth: breadth-first expansion of cells through their connectors.
//!
//! A run has three phases:
//!
//! 1. **Seeding**: the root cell is laid out at the origin with a connector on
//!    every side and queued.
//! 2. **Growth**: cells are popped from the queue. For a popped cell `N` one
//!    available connector is picked and a trial cell is rolled, aligned so that
//!    one of its connectors faces the picked one, and tested against every
//!    accepted cell except `N`. Accepted cells join the queue; `N` is requeued
//!    until it has no connector left, after which it is finalized.
//! 3. **Sealing**: every connector that never received a neighbour becomes a
//!    solid wall, and the surviving cells are listed under the maze root.
//!
//! # Examples
//!
//! ```rust
//! use mazegrow::maze::{GeneratorConfig, MazeGenerator};
//!
//! let config = GeneratorConfig::default();
//! let (maze, stats) = MazeGenerator::from_seed(42, config).generate().expect("generation");
//!
//! assert_eq!(maze.cells().len(), stats.accepted + 1);
//! assert!(maze.unlinked_connectors().is_empty());
//! ```

use std::collections::VecDeque;
use std::f32::consts::PI;

use rand::prelude::*;

use super::config::{ConnectorPick, GeneratorConfig};
use super::layout::{CellPlan, build_cell};
use super::node::{Maze, NodeId, NodeKind};
use crate::collision::{OrientedBox, boxes_overlap};
use crate::error::MazeError;
use crate::math::{Quat, Transform, Vec3};
use crate::profiling::{ScopedTimer, Timer};

/// Counters describing how a run went.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Cells accepted after the root.
    pub accepted: usize,
    /// Trial cells discarded because they collided.
    pub rejected: usize,
    /// Trial cells discarded because they had no connector to align with.
    pub abandoned: usize,
    /// Connectors sealed during growth after running out of retries.
    pub exhausted: usize,
    /// Connectors sealed by the final pass.
    pub sealed: usize,
    /// Placement attempts, accepted or not.
    pub attempts: usize,
}

/// Outcome of one placement attempt.
enum Placement {
    Accepted { cell: NodeId, connector: NodeId },
    Rejected,
    Abandoned,
}

/// Grows a maze from a root cell.
///
/// The generator owns its random source, so two generators built from the same
/// seed and configuration produce identical mazes.
pub struct MazeGenerator<R: Rng> {
    config: GeneratorConfig,
    rng: R,
    maze: Maze,
    queue: VecDeque<NodeId>,
    finalized: Vec<NodeId>,
    obstacles: Vec<OrientedBox>,
    stats: GenerationStats,
}

impl MazeGenerator<StdRng> {
    /// A generator with a seeded standard RNG.
    pub fn from_seed(seed: u64, config: GeneratorConfig) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        let maze = Maze::with_volume_inset(config.volume_inset);
        Self {
            config,
            rng,
            maze,
            queue: VecDeque::new(),
            finalized: Vec::new(),
            obstacles: Vec::new(),
            stats: GenerationStats::default(),
        }
    }

    /// Adds a world-space box that no cell may intersect.
    pub fn add_obstacle(&mut self, transform: Transform) {
        self.obstacles.push(OrientedBox::from(&transform));
    }

    /// Runs all three phases and hands back the finished maze.
    ///
    /// # Errors
    /// Fails when a cell plan cannot be laid out or when aligning a trial cell
    /// hits a degenerate transform.
    pub fn generate(mut self) -> Result<(Maze, GenerationStats), MazeError> {
        let run = ScopedTimer::new("maze_generation", self.config.profiler.clone());
        log::info!(
            "Generating maze: up to {} cells, {} retries per connector",
            self.config.max_accepted_cells,
            self.config.max_retries_per_connector
        );

        {
            let _phase = ScopedTimer::new("maze_seeding", self.config.profiler.clone());
            self.seed()?;
        }
        {
            let _phase = ScopedTimer::new("maze_growth", self.config.profiler.clone());
            self.grow()?;
        }
        {
            let _phase = ScopedTimer::new("maze_sealing", self.config.profiler.clone());
            self.seal();
        }
        drop(run);

        log::info!(
            "Maze generated: {} cells, {} attempts ({} rejected, {} abandoned), {} connectors sealed",
            self.maze.cells().len(),
            self.stats.attempts,
            self.stats.rejected,
            self.stats.abandoned,
            self.stats.exhausted + self.stats.sealed
        );
        Ok((self.maze, self.stats))
    }

    fn seed(&mut self) -> Result<(), MazeError> {
        let width = sample(&mut self.rng, self.config.root_size);
        let depth = sample(&mut self.rng, self.config.root_size);
        let plan = CellPlan::quad(NodeKind::Root, width, depth, [NodeKind::Transparent; 4]);
        let transform = Transform::from_position(Vec3::new(0.0, self.config.elevation, 0.0));

        let root = self.maze.root();
        let cell = build_cell(
            &mut self.maze,
            root,
            transform,
            &plan,
            &self.config.layout,
            self.config.elevation,
            &mut self.rng,
        )?;
        log::debug!("Seeded root cell {} ({width:.1} x {depth:.1})", cell.index());
        self.queue.push_back(cell);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), MazeError> {
        while let Some(cell) = self.queue.pop_front() {
            if self.stats.accepted >= self.config.max_accepted_cells
                || self.stats.attempts >= self.config.max_attempts
            {
                self.queue.push_front(cell);
                break;
            }
            self.step(cell)?;
        }

        if self.stats.attempts >= self.config.max_attempts {
            log::warn!(
                "Growth stopped after {} attempts with {} cells queued",
                self.stats.attempts,
                self.queue.len()
            );
        }
        Ok(())
    }

    /// One placement attempt through one connector of `cell`.
    fn step(&mut self, cell: NodeId) -> Result<(), MazeError> {
        let available = self.maze.available_connectors(cell);
        if available.is_empty() {
            log::trace!("Cell {} has no connector left, finalizing", cell.index());
            self.finalized.push(cell);
            return Ok(());
        }
        let target = available[self.rng.gen_range(0..available.len())];

        self.maze.properties_mut(target).available_count += 1;
        self.queue.push_back(cell);
        self.stats.attempts += 1;

        let mark = self.maze.len();
        match self.place(cell, target)? {
            Placement::Accepted {
                cell: placed,
                connector,
            } => {
                let props = self.maze.properties_mut(target);
                props.is_available = false;
                props.target_link = Some(placed);
                let props = self.maze.properties_mut(connector);
                props.is_available = false;
                props.target_link = Some(cell);

                self.queue.push_back(placed);
                self.stats.accepted += 1;
                log::debug!(
                    "Accepted {:?} cell {} through connector {} of cell {}",
                    self.maze.node(placed).kind,
                    placed.index(),
                    target.index(),
                    cell.index()
                );
            }
            outcome => {
                self.maze.truncate(mark);
                match outcome {
                    Placement::Rejected => self.stats.rejected += 1,
                    _ => self.stats.abandoned += 1,
                }

                let props = self.maze.properties_mut(target);
                if props.available_count >= self.config.max_retries_per_connector {
                    props.is_available = false;
                    self.maze.change_kind(target, NodeKind::Solid);
                    self.stats.exhausted += 1;
                    log::debug!(
                        "Sealed connector {} of cell {} after {} attempts",
                        target.index(),
                        cell.index(),
                        self.config.max_retries_per_connector
                    );
                }
            }
        }
        Ok(())
    }

    /// Rolls a trial cell, aligns it with `target` and tests it for collisions.
    fn place(&mut self, cell: NodeId, target: NodeId) -> Result<Placement, MazeError> {
        let timer = Timer::new("cell_placement", self.config.profiler.clone());

        let kind = self.roll_kind(self.maze.node(cell).kind);
        let plan = self.plan(kind);
        let elevation = self.maze.world_transform(cell).position.y();
        let root = self.maze.root();
        let trial = build_cell(
            &mut self.maze,
            root,
            Transform::IDENTITY,
            &plan,
            &self.config.layout,
            elevation,
            &mut self.rng,
        )?;

        let connectors = self.maze.available_connectors(trial);
        if connectors.is_empty() {
            log::trace!("Trial {kind:?} cell has no connector, abandoning it");
            timer.stop();
            return Ok(Placement::Abandoned);
        }
        let connector = match self.config.connector_pick {
            ConnectorPick::Fixed(index) if index < connectors.len() => connectors[index],
            _ => connectors[self.rng.gen_range(0..connectors.len())],
        };

        self.align(trial, connector, target)?;

        let collides = self.collides(trial, cell);
        timer.stop();
        if collides {
            log::trace!("Trial {kind:?} cell collides, rejecting it");
            Ok(Placement::Rejected)
        } else {
            Ok(Placement::Accepted {
                cell: trial,
                connector,
            })
        }
    }

    /// Kind of the next cell given the kind of the cell it grows from.
    fn roll_kind(&mut self, from: NodeKind) -> NodeKind {
        let config = &self.config;
        if from != NodeKind::Round && chance(&mut self.rng, config.round_chance) {
            NodeKind::Round
        } else if from != NodeKind::Corridor && chance(&mut self.rng, config.corridor_chance) {
            NodeKind::Corridor
        } else if from != NodeKind::Corridor && chance(&mut self.rng, config.challenge_chance) {
            NodeKind::Challenge
        } else {
            NodeKind::Room
        }
    }

    fn plan(&mut self, kind: NodeKind) -> CellPlan {
        let config = &self.config;
        let rng = &mut self.rng;
        let opening = config.opening_chance;

        match kind {
            NodeKind::Corridor => {
                let length = sample(rng, config.corridor_length);
                let mut sides = [NodeKind::Transparent; 4];
                sides[1] = roll_side(rng, opening);
                sides[3] = roll_side(rng, opening);
                CellPlan::quad(kind, config.corridor_width, length, sides)
            }
            NodeKind::Challenge => {
                let sides = std::array::from_fn(|_| roll_side(rng, opening));
                CellPlan::quad(kind, config.challenge_size, config.challenge_size, sides)
            }
            NodeKind::Round => {
                let (low, high) = config.round_sides;
                let count = rng.gen_range(low.min(high)..=low.max(high)).clamp(3, 8);
                let radius = (sample(rng, config.room_size) * 0.5).max(config.round_min_radius);
                let sides = (0..count).map(|_| roll_side(rng, opening)).collect();
                CellPlan::round(radius, sides)
            }
            _ => {
                let width = sample(rng, config.room_size);
                let depth = sample(rng, config.room_size);
                let sides = std::array::from_fn(|_| roll_side(rng, opening));
                CellPlan::quad(NodeKind::Room, width, depth, sides)
            }
        }
    }

    /// Moves the trial cell so that `connector` sits just outside `target`,
    /// facing it.
    fn align(&mut self, trial: NodeId, connector: NodeId, target: NodeId) -> Result<(), MazeError> {
        let target_world = self.maze.world_transform(target);
        let connector_world = self.maze.world_transform(connector);
        let trial_world = self.maze.world_transform(trial);

        let facing = target_world.rotation * Quat::from_rotation_y(PI);
        let turn = (facing * connector_world.rotation.inverse()).normalize();
        let anchor = target_world.position + target_world.forward() * target_world.scale.z().abs();

        let offset = connector_world.position - trial_world.position;
        let world = Transform::new(
            anchor - turn.rotate(offset),
            turn * trial_world.rotation,
            trial_world.scale,
        );

        let parent_world = match self.maze.node(trial).parent {
            Some(parent) => self.maze.world_transform(parent),
            None => Transform::IDENTITY,
        };
        self.maze.node_mut(trial).transform = world.local(&parent_world)?;
        Ok(())
    }

    /// Tests the trial cell against every accepted cell except the one it
    /// grows from, and against the obstacles.
    fn collides(&self, trial: NodeId, from: NodeId) -> bool {
        let _timer = ScopedTimer::new("collision_test", self.config.profiler.clone());

        let blocked = self
            .finalized
            .iter()
            .chain(self.queue.iter())
            .filter(|&&other| other != from)
            .any(|&other| self.maze.cells_overlap(trial, other));
        blocked
            || self.maze.cell_volumes(trial).iter().any(|volume| {
                self.obstacles
                    .iter()
                    .any(|obstacle| boxes_overlap(volume, obstacle))
            })
    }

    /// Lists the surviving cells under the maze root and walls up every
    /// connector that leads nowhere.
    fn seal(&mut self) {
        let mut cells: Vec<NodeId> = self.finalized.drain(..).chain(self.queue.drain(..)).collect();
        cells.sort();
        cells.dedup();

        for cell in cells {
            self.maze.attach(cell);
            for connector in self.maze.connectors(cell) {
                let props = self.maze.properties_mut(connector);
                if props.target_link.is_none() {
                    props.is_available = false;
                    self.maze.change_kind(connector, NodeKind::Solid);
                    self.stats.sealed += 1;
                }
            }
        }
        log::debug!("Sealing pass walled up {} connectors", self.stats.sealed);
    }
}

/// Generates a maze with the given seed, or from entropy when `seed` is `None`.
///
/// # Errors
/// See [`MazeGenerator::generate`].
pub fn generate(seed: Option<u64>, config: &GeneratorConfig) -> Result<Maze, MazeError> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (maze, _) = MazeGenerator::new(config.clone(), rng).generate()?;
    Ok(maze)
}

fn sample<R: Rng + ?Sized>(rng: &mut R, (low, high): (f32, f32)) -> f32 {
    if low == high {
        return low;
    }
    rng.gen_range(low.min(high)..=low.max(high))
}

fn roll_side<R: Rng + ?Sized>(rng: &mut R, opening_chance: f64) -> NodeKind {
    if chance(rng, opening_chance) {
        NodeKind::Transparent
    } else {
        NodeKind::Solid
    }
}

fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0))
}
