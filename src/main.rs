//! Command-line front end: grows one maze and prints what came out.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mazegrow::maze::{ConnectorPick, GeneratorConfig, MazeGenerator, NodeKind};
use mazegrow::profiling::{self, ProfilerConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "mazegrow", about = "Grow a procedural 3D maze and summarize it")]
struct Cli {
    /// Seed for the random source; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Number of cells to accept after the root
    #[arg(long, default_value_t = 4)]
    max_cells: usize,
    /// Placement attempts per connector before it is sealed
    #[arg(long, default_value_t = 10)]
    retries: u32,
    /// Always align trial cells through the connector at this index
    #[arg(long)]
    fixed_connector: Option<usize>,
    /// Height of the maze floor above the ground
    #[arg(long, default_value_t = 0.0)]
    elevation: f32,
    /// Print phase timings after generation
    #[arg(long)]
    profile: bool,
    /// Also write the timing report into this directory
    #[arg(long, requires = "profile")]
    report_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = GeneratorConfig {
        max_accepted_cells: cli.max_cells,
        max_retries_per_connector: cli.retries,
        elevation: cli.elevation,
        connector_pick: cli
            .fixed_connector
            .map_or(ConnectorPick::Random, ConnectorPick::Fixed),
        profiler: if cli.profile {
            ProfilerConfig {
                enabled: true,
                ..ProfilerConfig::default()
            }
        } else {
            ProfilerConfig::disabled()
        },
        ..GeneratorConfig::default()
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (maze, stats) = match MazeGenerator::new(config, rng).generate() {
        Ok(generated) => generated,
        Err(err) => {
            log::error!("Maze generation failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut kinds: BTreeMap<String, usize> = BTreeMap::new();
    for &cell in maze.cells() {
        *kinds.entry(format!("{:?}", maze.node(cell).kind)).or_default() += 1;
    }
    let walls = maze
        .ids()
        .filter(|&id| maze.node(id).kind == NodeKind::Solid)
        .count();

    println!("Cells: {}", maze.cells().len());
    for (kind, count) in &kinds {
        println!("  {kind:<10} {count}");
    }
    println!("Nodes: {} ({walls} wall segments)", maze.len());
    println!(
        "Attempts: {} ({} accepted, {} rejected, {} abandoned)",
        stats.attempts, stats.accepted, stats.rejected, stats.abandoned
    );
    println!(
        "Connectors sealed: {} during growth, {} at the end",
        stats.exhausted, stats.sealed
    );
    if let Some(bounds) = maze.bounds() {
        let size = bounds.size();
        println!(
            "Footprint: {:.1} x {:.1} x {:.1}",
            size.x(),
            size.y(),
            size.z()
        );
    }

    if cli.profile {
        if let Some(run) = profiling::get_measurement("maze_generation") {
            println!("Generated in {:?}", run.total_duration);
        }
        print!("{}", profiling::summary());
        if let Some(dir) = cli.report_dir
            && let Err(err) = profiling::write_report(&dir)
        {
            log::error!("Could not write profile report: {err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
