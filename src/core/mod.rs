use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub mod config;
pub mod error;
pub mod event;
pub mod formatter;
pub mod job;
pub mod matcher;
pub mod parser;
pub mod report;
pub mod summary;
pub mod timestamp;

use config::MonitorConfig;
use error::{MonitorError, ParseError};
use formatter::{format_duration, format_summary_line};
use job::Job;
use matcher::AnomalyRecord;
use parser::RawRow;
use report::{Report, ReportConfig};
use summary::RunSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub input: PathBuf,
    pub report: PathBuf,
    pub anomalies: Option<PathBuf>,
}

/// Everything derived from one set of input rows.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub rows: usize,
    pub parse_errors: Vec<ParseError>,
    pub jobs: Vec<Job>,
    pub anomalies: Vec<AnomalyRecord>,
    pub report: Report,
}

/// Parser -> matcher -> report, with no I/O.
pub fn analyze(rows: &[RawRow], config: &MonitorConfig) -> Analysis {
    let (events, parse_errors) = parser::parse(rows, config.base_date);
    let (mut jobs, anomalies) = matcher::match_events(events);

    let report_config = ReportConfig::from(config);
    report::classify_jobs(&mut jobs, &report_config);
    let report = report::generate(&jobs, &report_config);

    Analysis {
        rows: rows.len(),
        parse_errors,
        jobs,
        anomalies,
        report,
    }
}

pub fn run(paths: &RunPaths, config: &MonitorConfig) -> Result<RunSummary, MonitorError> {
    config.validate()?;

    info!("Processing started for file {}", paths.input.display());

    let file = File::open(&paths.input).map_err(|source| MonitorError::ReadInput {
        path: paths.input.clone(),
        source,
    })?;
    let rows = parser::read_rows(BufReader::new(file), config.has_header)
        .map_err(|err| csv_io_error(err, &paths.input, true))?;

    let analysis = analyze(&rows, config);

    for error in &analysis.parse_errors {
        warn!("Line {} {}", error.row_index, error.reason);
    }
    for anomaly in &analysis.anomalies {
        warn!("{anomaly}");
    }
    for job in &analysis.jobs {
        if let Some(status) = job.status {
            debug!(
                job_id = %job.job_id,
                runtime = %format_duration(job.runtime),
                %status,
                "job classified"
            );
        }
    }

    write_csv_output(&paths.report, |file| analysis.report.write_csv(file))?;
    if let Some(path) = &paths.anomalies {
        write_csv_output(path, |file| report::write_anomalies_csv(&analysis.anomalies, file))?;
        info!("Anomalies saved to {}", path.display());
    }

    let mut summary = RunSummary {
        rows: analysis.rows,
        parse_errors: analysis.parse_errors.len(),
        anomalies: analysis.anomalies.len(),
        reported: analysis.report.len(),
        report_path: paths.report.clone(),
        anomalies_path: paths.anomalies.clone(),
        ..RunSummary::default()
    };
    summary.count_statuses(&analysis.jobs);

    info!("{}", format_summary_line(&summary));
    if !summary.is_clean() {
        warn!(
            "Run finished with {} malformed rows and {} anomalies",
            summary.parse_errors, summary.anomalies
        );
    }
    info!("Processing finished. Report saved to {}", paths.report.display());

    Ok(summary)
}

fn write_csv_output<F>(path: &Path, write: F) -> Result<(), MonitorError>
where
    F: FnOnce(&mut File) -> Result<(), csv::Error>,
{
    crate::util::write_atomically(path, |file| {
        write(file).map_err(|err| csv_io_error(err, path, false))
    })
}

fn csv_io_error(err: csv::Error, path: &Path, reading: bool) -> MonitorError {
    if !err.is_io_error() {
        return MonitorError::Csv(err);
    }
    let source = match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        other => io::Error::other(format!("{other:?}")),
    };
    let path = path.to_path_buf();
    if reading {
        MonitorError::ReadInput { path, source }
    } else {
        MonitorError::WriteOutput { path, source }
    }
}
