//! Report formatting utilities
//!
//! Turns aggregated measurements into an aligned plain-text table.

use std::fmt::Write;

use super::data::PerformanceMetrics;

/// Helper function to calculate column widths for table formatting
///
/// # Arguments
/// * `rows` - A slice of tuples containing operation names and their metrics
/// * `has_multiple_counts` - Whether to include detailed statistics columns
///
/// # Returns
/// A tuple of column widths in the order: (name, count, total, avg, min, max)
pub fn calculate_column_widths(
    rows: &[(&String, &PerformanceMetrics)],
    has_multiple_counts: bool,
) -> (usize, usize, usize, usize, usize, usize) {
    let mut name_width = "Operation".len();
    let mut count_width = "Count".len();
    let mut total_width = "Total".len();
    let mut avg_width = "Avg".len();
    let mut min_width = "Min".len();
    let mut max_width = "Max".len();

    for (name, metrics) in rows {
        name_width = name_width.max(name.len());
        count_width = count_width.max(metrics.count.to_string().len());
        total_width = total_width.max(format!("{:?}", metrics.total_duration).len());

        if has_multiple_counts {
            avg_width = avg_width.max(format!("{:?}", metrics.avg_duration).len());
            min_width = min_width.max(format!("{:?}", metrics.min_duration).len());
            max_width = max_width.max(format!("{:?}", metrics.max_duration).len());
        }
    }

    // Padding
    (
        name_width.max(24),
        count_width.max(6),
        total_width.max(12),
        avg_width.max(12),
        min_width.max(12),
        max_width.max(12),
    )
}

/// Renders rows as a table sorted by total duration, most expensive first.
pub fn format_table(rows: &mut [(&String, &PerformanceMetrics)]) -> String {
    rows.sort_by(|a, b| {
        b.1.total_duration
            .cmp(&a.1.total_duration)
            .then_with(|| a.0.cmp(b.0))
    });

    let has_multiple_counts = rows.iter().any(|(_, m)| m.count > 1);
    let (name_w, count_w, total_w, avg_w, min_w, max_w) =
        calculate_column_widths(rows, has_multiple_counts);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_w$} | {:>count_w$} | {:>total_w$} | {:>avg_w$} | {:>min_w$} | {:>max_w$}",
        "Operation", "Count", "Total", "Avg", "Min", "Max",
    );
    // +15 for separators and spaces
    let _ = writeln!(
        out,
        "{}",
        "-".repeat(name_w + count_w + total_w + avg_w + min_w + max_w + 15)
    );

    for (name, metrics) in rows.iter() {
        let total = format!("{:?}", metrics.total_duration);
        if metrics.count > 1 {
            let _ = writeln!(
                out,
                "{:<name_w$} | {:>count_w$} | {:>total_w$} | {:>avg_w$} | {:>min_w$} | {:>max_w$}",
                name,
                metrics.count,
                total,
                format!("{:?}", metrics.avg_duration),
                format!("{:?}", metrics.min_duration),
                format!("{:?}", metrics.max_duration),
            );
        } else {
            let _ = writeln!(
                out,
                "{:<name_w$} | {:>count_w$} | {:>total_w$}",
                name, metrics.count, total,
            );
        }
    }
    out
}
