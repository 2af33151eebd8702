//! Profiling utility functions and helper types
//!
//! This module provides timers plus functions for reading, rendering and saving
//! the collected data.
//!
//! # Key Features
//! - **Manual Timers**: `Timer` for explicit start/stop timing
//! - **Scoped Timers**: `ScopedTimer` for automatic timing based on scope
//! - **File Output**: `write_report` saves a timestamped summary

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::ProfilerConfig;
use super::data::{PerformanceMetrics, profile_data, record};
use super::format::format_table;

/// A timer for measuring execution time of code sections
///
/// Starts timing when created and records the measurement when stopped.
pub struct Timer {
    /// The name of the operation being timed
    name: String,
    /// When the timer was started
    start_time: Instant,
    /// Configuration for this timer
    config: ProfilerConfig,
}

impl Timer {
    /// Creates a new timer with the given name
    ///
    /// # Arguments
    /// * `name` - The name of the operation to be timed
    /// * `config` - Configuration for the timer behavior
    pub fn new(name: &str, config: ProfilerConfig) -> Self {
        Self {
            name: name.to_string(),
            start_time: Instant::now(),
            config,
        }
    }

    /// Stops the timer and records the measurement
    ///
    /// Returns the duration that elapsed since the timer was created.
    pub fn stop(self) -> Duration {
        let duration = self.start_time.elapsed();
        record(&self.name, duration, &self.config);
        duration
    }
}

/// A scoped timer that records when dropped
pub struct ScopedTimer {
    timer: Option<Timer>,
}

impl ScopedTimer {
    /// Creates a new scoped timer
    pub fn new(name: &str, config: ProfilerConfig) -> Self {
        Self {
            timer: Some(Timer::new(name, config)),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}

/// Gets a copy of all recorded measurements, indexed by operation name
pub fn get_measurements() -> HashMap<String, PerformanceMetrics> {
    profile_data().get_measurements()
}

/// Gets a copy of one operation's metrics
pub fn get_measurement(name: &str) -> Option<PerformanceMetrics> {
    profile_data().get(name)
}

/// Renders every recorded measurement as a table
///
/// Operations are split into one-off phases (seeding, sealing, whole runs) and
/// repeated work (placements, collision tests), each sorted by total time.
pub fn summary() -> String {
    let measurements = get_measurements();
    if measurements.is_empty() {
        return "[PROFILE] No measurements recorded\n".to_string();
    }

    let (mut phases, mut repeated): (Vec<_>, Vec<_>) =
        measurements.iter().partition(|(_, m)| m.count == 1);

    let mut out = String::from("\n=== GENERATION PROFILE ===\n");
    if !phases.is_empty() {
        let total: f64 = phases
            .iter()
            .map(|(_, m)| m.total_duration.as_secs_f64())
            .sum();
        out.push_str("\n--- Phases ---\n");
        out.push_str(&format_table(&mut phases));
        out.push_str(&format!("Total phase time: {total:.3}s\n"));
    }
    if !repeated.is_empty() {
        out.push_str("\n--- Repeated operations ---\n");
        out.push_str(&format_table(&mut repeated));
    }
    out
}

/// Writes the summary to `dir/profile_<timestamp>.txt`
///
/// # Returns
/// The path of the written report, or an `io::Error` if the directory or file
/// cannot be created.
pub fn write_report(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let now: DateTime<Local> = Local::now();
    let path = dir.join(format!("profile_{}.txt", now.format("%Y-%m-%d_%H-%M-%S")));
    let contents = format!(
        "Maze generation profile\nGenerated: {}\n{}",
        now.format("%Y-%m-%d %H:%M:%S"),
        summary()
    );
    fs::write(&path, contents)?;

    log::info!("[PROFILE] report written to {}", path.display());
    Ok(path)
}
