use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("cannot read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

/// Why a single input row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorReason {
    #[error("malformed row ({found} fields, expected {expected})")]
    FieldCount { found: usize, expected: usize },
    #[error("bad timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("unknown event '{0}'")]
    UnknownEvent(String),
    #[error("empty job id")]
    EmptyJobId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub row_index: u64,
    pub reason: ParseErrorReason,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.row_index, self.reason)
    }
}

impl std::error::Error for ParseError {}
