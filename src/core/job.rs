use std::fmt;

use chrono::TimeDelta;

use crate::core::timestamp::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobStatus {
    Ok,
    Warning,
    Error,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Ok => "OK",
            JobStatus::Warning => "WARNING",
            JobStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A START/END pair for one job id.
///
/// `status` stays `None` until the report classifies the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub job_id: String,
    pub job_name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub runtime: TimeDelta,
    pub status: Option<JobStatus>,
}

impl Job {
    pub fn new(job_id: String, job_name: String, start: Timestamp, end: Timestamp) -> Self {
        let runtime = end.elapsed_since(&start);
        Self {
            job_id,
            job_name,
            start,
            end,
            runtime,
            status: None,
        }
    }

    pub fn runtime_seconds(&self) -> f64 {
        match self.runtime.num_nanoseconds() {
            Some(nanos) => nanos as f64 / 1_000_000_000.0,
            None => self.runtime.num_milliseconds() as f64 / 1_000.0,
        }
    }

    /// Fractional digits needed to show the runtime without losing anything.
    pub fn precision(&self) -> u8 {
        self.start.precision().max(self.end.precision())
    }

    pub fn is_negative(&self) -> bool {
        self.runtime < TimeDelta::zero()
    }
}
