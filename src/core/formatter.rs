use chrono::TimeDelta;

use crate::core::summary::RunSummary;

/// Renders a runtime in seconds with exactly `precision` fractional digits.
///
/// Both timestamps carry at most `precision` digits, so their difference is
/// representable without rounding.
pub fn format_runtime(runtime: TimeDelta, precision: u8) -> String {
    let sign = if runtime < TimeDelta::zero() { "-" } else { "" };
    let abs = runtime.abs();
    let secs = abs.num_seconds();

    if precision == 0 {
        return format!("{sign}{secs}");
    }

    let precision = u32::from(precision.min(9));
    let nanos = abs.subsec_nanos().unsigned_abs();
    let frac = nanos / 10u32.pow(9 - precision);
    format!("{sign}{secs}.{frac:0width$}", width = precision as usize)
}

pub fn format_duration(duration: TimeDelta) -> String {
    let sign = if duration < TimeDelta::zero() { "-" } else { "" };
    let total_secs = duration.abs().num_seconds();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{sign}{:02}:{:02}:{:02}", hours, minutes, seconds)
}

pub fn format_summary_line(summary: &RunSummary) -> String {
    format!(
        "rows={} parse_errors={} jobs={} ok={} warning={} error={} anomalies={} reported={}",
        summary.rows,
        summary.parse_errors,
        summary.jobs,
        summary.ok,
        summary.warning,
        summary.error,
        summary.anomalies,
        summary.reported
    )
}
