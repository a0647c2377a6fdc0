use chrono::NaiveDate;

use crate::core::error::MonitorError;

pub const DEFAULT_WARNING_THRESHOLD_SECS: f64 = 300.0;
pub const DEFAULT_ERROR_THRESHOLD_SECS: f64 = 600.0;

/// Everything the pipeline needs besides the file paths.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub warning_threshold_seconds: f64,
    pub error_threshold_seconds: f64,
    /// Keep OK jobs in the report. When false only WARNING/ERROR rows are written.
    pub include_ok: bool,
    /// Skip the first record of the input.
    pub has_header: bool,
    /// Date used for time-only timestamps.
    pub base_date: NaiveDate,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            warning_threshold_seconds: DEFAULT_WARNING_THRESHOLD_SECS,
            error_threshold_seconds: DEFAULT_ERROR_THRESHOLD_SECS,
            include_ok: true,
            has_header: false,
            base_date: NaiveDate::default(),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), MonitorError> {
        let warning = self.warning_threshold_seconds;
        let error = self.error_threshold_seconds;

        if !warning.is_finite() || warning < 0.0 {
            return Err(MonitorError::InvalidConfig {
                message: format!("warning threshold must be a non-negative number, got {warning}"),
            });
        }
        if !error.is_finite() || error < 0.0 {
            return Err(MonitorError::InvalidConfig {
                message: format!("error threshold must be a non-negative number, got {error}"),
            });
        }
        if error < warning {
            return Err(MonitorError::InvalidConfig {
                message: format!(
                    "error threshold ({error}s) is below warning threshold ({warning}s)"
                ),
            });
        }
        Ok(())
    }
}
