//! `tracing` setup: human-readable lines on stderr, optionally mirrored
//! (without colours) to an append-only log file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::error::MonitorError;
use crate::util::ensure_parent_dir;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Used when `RUST_LOG` is not set.
    pub level: Level,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file: None,
        }
    }
}

pub fn init(cfg: &LogConfig) -> Result<(), MonitorError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.level.as_str().to_ascii_lowercase()));

    let file_layer = match &cfg.file {
        Some(path) => {
            ensure_parent_dir(path).map_err(|err| MonitorError::Logging {
                message: err.to_string(),
            })?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| MonitorError::Logging {
                    message: format!("cannot open {}: {e}", path.display()),
                })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| MonitorError::Logging {
            message: e.to_string(),
        })
}
