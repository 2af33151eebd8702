use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::ProfilerConfig;

/// Performance metrics for a specific operation
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Number of times this operation was measured
    pub count: usize,
    /// Total duration of all measurements combined
    pub total_duration: Duration,
    /// Shortest duration recorded for this operation
    pub min_duration: Duration,
    /// Longest duration recorded for this operation
    pub max_duration: Duration,
    /// Average duration across all measurements
    pub avg_duration: Duration,
}

impl PerformanceMetrics {
    pub(crate) fn new() -> Self {
        Self {
            count: 0,
            total_duration: Duration::ZERO,
            min_duration: Duration::MAX,
            max_duration: Duration::ZERO,
            avg_duration: Duration::ZERO,
        }
    }

    pub(crate) fn update(&mut self, duration: Duration) {
        self.count += 1;
        self.total_duration += duration;
        self.min_duration = self.min_duration.min(duration);
        self.max_duration = self.max_duration.max(duration);
        self.avg_duration = self.total_duration / self.count as u32;
    }
}

lazy_static::lazy_static! {
    /// Centralized measurement storage
    pub static ref PROFILE_DATA: Mutex<ProfileData> = Mutex::new(ProfileData::new());
}

/// Locks the registry. A panic while holding the lock leaves plain counters
/// behind, so a poisoned lock is still usable.
pub(crate) fn profile_data() -> MutexGuard<'static, ProfileData> {
    PROFILE_DATA.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Records a measurement if it passes the configured threshold.
pub(crate) fn record(name: &str, duration: Duration, config: &ProfilerConfig) {
    if !config.enabled || duration < config.min_duration_threshold {
        return;
    }
    profile_data().record_measurement(name, duration, config.max_samples);
    if config.log_results {
        log::debug!("[PROFILE] {name}: {duration:?}");
    }
}

/// Central storage for all measurements
pub struct ProfileData {
    measurements: HashMap<String, PerformanceMetrics>,
}

impl ProfileData {
    pub(crate) fn new() -> Self {
        Self {
            measurements: HashMap::new(),
        }
    }

    /// Records a new measurement for the specified operation
    ///
    /// # Arguments
    /// * `name` - The name of the operation being measured
    /// * `duration` - The duration of the operation
    /// * `max_samples` - Maximum number of distinct operations to keep; 0 keeps all
    pub fn record_measurement(&mut self, name: &str, duration: Duration, max_samples: usize) {
        if max_samples > 0
            && !self.measurements.contains_key(name)
            && self.measurements.len() >= max_samples
        {
            log::trace!("[PROFILE] dropping {name}: registry holds {max_samples} operations");
            return;
        }
        self.measurements
            .entry(name.to_string())
            .or_insert_with(PerformanceMetrics::new)
            .update(duration);
    }

    /// Returns a copy of all recorded measurements
    pub fn get_measurements(&self) -> HashMap<String, PerformanceMetrics> {
        self.measurements.clone()
    }

    /// Returns a copy of one operation's metrics
    pub fn get(&self, name: &str) -> Option<PerformanceMetrics> {
        self.measurements.get(name).cloned()
    }

    /// Number of distinct operations recorded
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// `true` when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Clears all recorded measurements
    pub fn clear(&mut self) {
        self.measurements.clear();
    }
}
