use std::path::PathBuf;

use crate::core::job::{Job, JobStatus};

/// Counts for one finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub parse_errors: usize,
    pub jobs: usize,
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
    pub anomalies: usize,
    /// Rows written to the report.
    pub reported: usize,
    pub report_path: PathBuf,
    pub anomalies_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn count_statuses(&mut self, jobs: &[Job]) {
        self.jobs = jobs.len();
        for job in jobs {
            match job.status {
                Some(JobStatus::Ok) => self.ok += 1,
                Some(JobStatus::Warning) => self.warning += 1,
                Some(JobStatus::Error) => self.error += 1,
                None => {}
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.parse_errors == 0 && self.anomalies == 0
    }
}
