//! Profiling module tests
//!
//! The registry is process-wide and tests run in parallel, so every test records
//! under its own operation names and never clears the shared registry.

#[cfg(test)]
mod tests {
    use crate::profiling::data::ProfileData;
    use crate::profiling::format::format_table;
    use crate::profiling::*;
    use std::thread;
    use std::time::Duration;

    fn enabled() -> ProfilerConfig {
        ProfilerConfig {
            enabled: true,
            log_results: false,
            min_duration_threshold: Duration::ZERO,
            max_samples: 0,
        }
    }

    /// Tests that `Timer` measures at least the slept duration and records it.
    #[test]
    fn test_timer() {
        let timer = Timer::new("test_timer_op", enabled());
        thread::sleep(Duration::from_millis(5));
        let duration = timer.stop();

        assert!(duration >= Duration::from_millis(5));
        let metrics = get_measurement("test_timer_op").expect("recorded");
        assert!(metrics.count >= 1);
    }

    /// Tests that `ScopedTimer` records when it goes out of scope.
    #[test]
    fn test_scoped_timer() {
        {
            let _timer = ScopedTimer::new("test_scoped_op", enabled());
        }
        assert!(get_measurements().contains_key("test_scoped_op"));
    }

    /// Tests that a disabled configuration records nothing.
    #[test]
    fn test_disabled_records_nothing() {
        Timer::new("test_disabled_op", ProfilerConfig::disabled()).stop();
        {
            let _timer = ScopedTimer::new("test_disabled_scoped", ProfilerConfig::disabled());
        }

        assert!(get_measurement("test_disabled_op").is_none());
        assert!(get_measurement("test_disabled_scoped").is_none());
    }

    /// Tests that library callers only record after opting in.
    #[test]
    fn test_default_is_disabled() {
        assert!(!ProfilerConfig::default().enabled);
        assert_eq!(ProfilerConfig::default(), ProfilerConfig::disabled());

        Timer::new("test_default_op", ProfilerConfig::default()).stop();
        assert!(get_measurement("test_default_op").is_none());
    }

    /// Tests that measurements under the threshold are dropped.
    #[test]
    fn test_threshold_filters_fast_operations() {
        let config = ProfilerConfig {
            min_duration_threshold: Duration::from_secs(60),
            ..enabled()
        };
        Timer::new("test_threshold_op", config).stop();
        assert!(get_measurement("test_threshold_op").is_none());
    }

    /// Tests aggregation of repeated measurements.
    #[test]
    fn test_metrics_aggregation() {
        let mut data = ProfileData::new();
        data.record_measurement("op", Duration::from_millis(2), 0);
        data.record_measurement("op", Duration::from_millis(4), 0);

        let metrics = data.get("op").expect("recorded");
        assert_eq!(metrics.count, 2);
        assert_eq!(metrics.total_duration, Duration::from_millis(6));
        assert_eq!(metrics.min_duration, Duration::from_millis(2));
        assert_eq!(metrics.max_duration, Duration::from_millis(4));
        assert_eq!(metrics.avg_duration, Duration::from_millis(3));
    }

    /// Tests that the registry stops accepting new operations at capacity.
    #[test]
    fn test_registry_capacity() {
        let mut data = ProfileData::new();
        data.record_measurement("a", Duration::from_millis(1), 2);
        data.record_measurement("b", Duration::from_millis(1), 2);
        data.record_measurement("c", Duration::from_millis(1), 2);
        data.record_measurement("a", Duration::from_millis(1), 2);

        assert_eq!(data.len(), 2);
        assert!(data.get("c").is_none());
        assert_eq!(data.get("a").map(|m| m.count), Some(2));

        data.clear();
        assert!(data.is_empty());
    }

    /// Tests table rendering order and layout.
    #[test]
    fn test_format_table() {
        let mut data = ProfileData::new();
        data.record_measurement("fast", Duration::from_micros(10), 0);
        data.record_measurement("slow", Duration::from_millis(10), 0);
        data.record_measurement("slow", Duration::from_millis(30), 0);
        let measurements = data.get_measurements();

        let mut rows: Vec<_> = measurements.iter().collect();
        let table = format_table(&mut rows);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Operation"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("slow"));
        assert!(lines[3].starts_with("fast"));
        assert_eq!(lines.len(), 4);
    }

    /// Tests that a report file is written with the summary.
    #[test]
    fn test_write_report() {
        Timer::new("test_report_op", enabled()).stop();
        let dir = std::env::temp_dir().join(format!("mazegrow-profile-{}", std::process::id()));

        let path = write_report(&dir).expect("report written");
        let contents = std::fs::read_to_string(&path).expect("report readable");

        assert!(contents.starts_with("Maze generation profile"));
        assert!(contents.contains("test_report_op"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
