//! Generator tuning.
//!
//! Every knob of the growth loop and of the cell layout lives here, with
//! defaults that produce small, readable mazes.

use crate::profiling::ProfilerConfig;

/// How the connector of a trial cell is chosen for alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectorPick {
    /// Uniformly among the trial cell's available connectors.
    #[default]
    Random,
    /// Always the connector at this index, falling back to a random one when
    /// the trial cell has fewer connectors.
    Fixed(usize),
}

/// Wall and floor dimensions shared by every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub wall_height: f32,
    pub wall_thickness: f32,
    /// Width of a connector opening.
    pub connector_width: f32,
    /// Shortest wall stub allowed on either side of a connector.
    pub min_wall_stub: f32,
    pub base_thickness: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wall_height: 4.0,
            wall_thickness: 1.0,
            connector_width: 2.0,
            min_wall_stub: 1.0,
            base_thickness: 0.5,
        }
    }
}

impl LayoutConfig {
    /// A side needs room for the opening plus a stub at each end to carry a
    /// connector.
    pub fn min_open_side(&self) -> f32 {
        self.connector_width + 2.0 * self.min_wall_stub
    }
}

/// Configuration for a generation run.
///
/// Size ranges are inclusive `(min, max)` pairs; reversed pairs are accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Stop growing once this many cells were accepted after the root.
    pub max_accepted_cells: usize,
    /// Placements tried through one connector before it is sealed.
    pub max_retries_per_connector: u32,
    /// Hard cap on placement attempts across the whole run.
    pub max_attempts: usize,
    pub root_size: (f32, f32),
    pub room_size: (f32, f32),
    pub corridor_length: (f32, f32),
    pub corridor_width: f32,
    pub challenge_size: f32,
    /// Inclusive range of side counts for round cells.
    pub round_sides: (usize, usize),
    pub round_min_radius: f32,
    pub round_chance: f64,
    pub corridor_chance: f64,
    pub challenge_chance: f64,
    /// Chance for each side of a new cell to carry a connector.
    pub opening_chance: f64,
    /// Height of the root floor above the ground.
    pub elevation: f32,
    /// Horizontal shrink applied to cell volumes before collision tests.
    pub volume_inset: f32,
    pub connector_pick: ConnectorPick,
    pub layout: LayoutConfig,
    pub profiler: ProfilerConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_accepted_cells: 4,
            max_retries_per_connector: 10,
            max_attempts: 10_000,
            root_size: (10.0, 16.0),
            room_size: (8.0, 16.0),
            corridor_length: (12.0, 24.0),
            corridor_width: 4.0,
            challenge_size: 24.0,
            round_sides: (3, 8),
            round_min_radius: 6.0,
            round_chance: 0.15,
            corridor_chance: 0.3,
            challenge_chance: 0.1,
            opening_chance: 0.6,
            elevation: 0.0,
            volume_inset: 0.05,
            connector_pick: ConnectorPick::Random,
            layout: LayoutConfig::default(),
            profiler: ProfilerConfig::default(),
        }
    }
}
