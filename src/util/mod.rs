use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tempfile::NamedTempFile;

use crate::core::error::MonitorError;

pub fn default_report_path(now: NaiveDateTime) -> PathBuf {
    Path::new("out").join(format!("report_{}.csv", now.format("%Y-%m-%d-%H-%M-%S")))
}

pub fn default_log_path(now: NaiveDateTime) -> PathBuf {
    Path::new("logs").join(format!("joblog_monitor_{}.log", now.format("%Y-%m-%d")))
}

pub fn ensure_parent_dir(path: &Path) -> Result<PathBuf, MonitorError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|source| MonitorError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parent)
}

/// Writes `path` through a temporary file in the same directory, so the
/// destination only appears once `write` has fully succeeded.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<(), MonitorError>
where
    F: FnOnce(&mut File) -> Result<(), MonitorError>,
{
    let parent = ensure_parent_dir(path)?;
    let mut tmp = NamedTempFile::new_in(&parent).map_err(|source| MonitorError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;

    write(tmp.as_file_mut())?;

    tmp.persist(path).map_err(|err| MonitorError::WriteOutput {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}
