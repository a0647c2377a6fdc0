use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgAction, Parser};
use tracing::Level;

use crate::core::config::{
    MonitorConfig, DEFAULT_ERROR_THRESHOLD_SECS, DEFAULT_WARNING_THRESHOLD_SECS,
};
use crate::core::RunPaths;
use crate::telemetry::LogConfig;
use crate::util::{default_log_path, default_report_path};

#[derive(Debug, Parser)]
#[command(
    name = "joblog-monitor",
    version,
    about = "Analyse a CSV job log, calculate runtimes, and emit a report highlighting jobs that exceed certain thresholds"
)]
pub struct Cli {
    /// Full path to the CSV log file to analyse (timestamp,job,event,job_id)
    #[arg(value_name = "LOGFILE")]
    pub logfile: PathBuf,

    /// Full path for the generated report CSV [default: out/report_<timestamp>.csv]
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Runtime in seconds at which a job is flagged WARNING
    #[arg(long = "warning", value_name = "SECS", default_value_t = DEFAULT_WARNING_THRESHOLD_SECS)]
    pub warning: f64,

    /// Runtime in seconds at which a job is flagged ERROR
    #[arg(long = "error", value_name = "SECS", default_value_t = DEFAULT_ERROR_THRESHOLD_SECS)]
    pub error: f64,

    /// Only write WARNING and ERROR jobs to the report
    #[arg(long = "flagged-only")]
    pub flagged_only: bool,

    /// The first line of the log is a header row
    #[arg(long = "has-header")]
    pub has_header: bool,

    /// Date applied to time-only timestamps [default: 1970-01-01]
    #[arg(long = "base-date", value_name = "YYYY-MM-DD", value_parser = parse_base_date)]
    pub base_date: Option<NaiveDate>,

    /// Also write pairing anomalies to this CSV file
    #[arg(long = "anomalies", value_name = "FILE")]
    pub anomalies: Option<PathBuf>,

    /// Append log output to this file [default: logs/joblog_monitor_<date>.log]
    #[arg(long = "log-file", value_name = "FILE", conflicts_with = "no_log_file")]
    pub log_file: Option<PathBuf>,

    /// Log to stderr only
    #[arg(long = "no-log-file")]
    pub no_log_file: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            warning_threshold_seconds: self.warning,
            error_threshold_seconds: self.error,
            include_ok: !self.flagged_only,
            has_header: self.has_header,
            base_date: self.base_date.unwrap_or_default(),
        }
    }

    pub fn run_paths(&self, now: NaiveDateTime) -> RunPaths {
        RunPaths {
            input: self.logfile.clone(),
            report: self
                .output
                .clone()
                .unwrap_or_else(|| default_report_path(now)),
            anomalies: self.anomalies.clone(),
        }
    }

    pub fn log_config(&self, now: NaiveDateTime) -> LogConfig {
        let level = if self.quiet {
            Level::WARN
        } else {
            match self.verbose {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        let file = if self.no_log_file {
            None
        } else {
            Some(
                self.log_file
                    .clone()
                    .unwrap_or_else(|| default_log_path(now)),
            )
        };
        LogConfig { level, file }
    }
}

fn parse_base_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| err.to_string())
}
