//! Profiling for maze generation.
//!
//! This module provides utilities for measuring where generation spends its
//! time: seeding, the growth loop, prototype layout, the collision oracle and
//! the final sealing pass. Measurements are aggregated per operation name in a
//! process-wide registry and can be rendered as a table or written to a report.
//!
//! # Features
//! - **Timing Measurements**: Manual [`Timer`]s and drop-based [`ScopedTimer`]s
//! - **Reports**: [`summary`] table and timestamped [`write_report`] files
//! - **Conditional Activation**: Disabled timers record nothing

use std::time::Duration;

/// Configuration for profiling features
///
/// Disabled by default; callers opt in by setting `enabled`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilerConfig {
    /// Whether measurements are recorded at all
    pub enabled: bool,
    /// Whether each measurement is also emitted through `log::debug!`
    pub log_results: bool,
    /// Minimum duration to record (filters out very fast operations)
    pub min_duration_threshold: Duration,
    /// Maximum number of distinct operations kept in the registry
    pub max_samples: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_results: false,
            min_duration_threshold: Duration::ZERO,
            max_samples: 1000,
        }
    }
}

impl ProfilerConfig {
    /// A configuration that records nothing.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Data structures for storing measurements
///
/// Contains [`PerformanceMetrics`] aggregation and the global registry.
pub mod data;

/// Column width calculation and table rendering for reports
pub mod format;

/// Timers, convenience functions and report output
pub mod utils;

#[cfg(test)]
mod tests;

pub use data::PerformanceMetrics;
pub use utils::*;
