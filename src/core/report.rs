use std::io::Write;

use crate::core::config::MonitorConfig;
use crate::core::formatter::format_runtime;
use crate::core::job::{Job, JobStatus};
use crate::core::matcher::AnomalyRecord;

pub const REPORT_HEADER: [&str; 6] = [
    "job_id",
    "job_name",
    "start_timestamp",
    "end_timestamp",
    "runtime_seconds",
    "status",
];

pub const ANOMALY_HEADER: [&str; 4] = ["job_id", "anomaly", "lines", "timestamps"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    pub warning_threshold_seconds: f64,
    pub error_threshold_seconds: f64,
    pub include_ok: bool,
}

impl From<&MonitorConfig> for ReportConfig {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            warning_threshold_seconds: config.warning_threshold_seconds,
            error_threshold_seconds: config.error_threshold_seconds,
            include_ok: config.include_ok,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub job_id: String,
    pub job_name: String,
    pub start: String,
    pub end: String,
    pub runtime_seconds: String,
    pub status: JobStatus,
}

impl ReportRow {
    fn fields(&self) -> [&str; 6] {
        [
            &self.job_id,
            &self.job_name,
            &self.start,
            &self.end,
            &self.runtime_seconds,
            self.status.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(REPORT_HEADER)?;
        for row in &self.rows {
            csv_writer.write_record(row.fields())?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Inclusive lower bounds: a runtime equal to a threshold takes that tier.
pub fn classify(runtime_seconds: f64, config: &ReportConfig) -> JobStatus {
    if runtime_seconds >= config.error_threshold_seconds {
        JobStatus::Error
    } else if runtime_seconds >= config.warning_threshold_seconds {
        JobStatus::Warning
    } else {
        JobStatus::Ok
    }
}

/// Assigns a status to every job, in place.
pub fn classify_jobs(jobs: &mut [Job], config: &ReportConfig) {
    for job in jobs.iter_mut() {
        job.status = Some(classify(job.runtime_seconds(), config));
    }
}

/// Builds the report rows in job order. Jobs must already be classified
/// (see [`classify_jobs`]); unclassified jobs are classified on the fly.
pub fn generate(jobs: &[Job], config: &ReportConfig) -> Report {
    let rows = jobs
        .iter()
        .filter_map(|job| {
            let status = job
                .status
                .unwrap_or_else(|| classify(job.runtime_seconds(), config));
            if status == JobStatus::Ok && !config.include_ok {
                return None;
            }
            Some(ReportRow {
                job_id: job.job_id.clone(),
                job_name: job.job_name.clone(),
                start: job.start.as_str().to_string(),
                end: job.end.as_str().to_string(),
                runtime_seconds: format_runtime(job.runtime, job.precision()),
                status,
            })
        })
        .collect();

    Report { rows }
}

pub fn write_anomalies_csv<W: Write>(
    anomalies: &[AnomalyRecord],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ANOMALY_HEADER)?;
    for anomaly in anomalies {
        let lines = anomaly
            .events
            .iter()
            .map(|e| e.line.to_string())
            .collect::<Vec<_>>()
            .join(";");
        let timestamps = anomaly
            .events
            .iter()
            .map(|e| e.timestamp.as_str())
            .collect::<Vec<_>>()
            .join(";");
        csv_writer.write_record([
            anomaly.job_id.as_str(),
            anomaly.kind.as_str(),
            lines.as_str(),
            timestamps.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}
