//! Error taxonomy for the residency monitor.

use std::io;

use thiserror::Error;

/// Everything that can go wrong while reading counters or touching the
/// persisted offsets file.
///
/// Failures are surfaced per-call and never corrupt held state: a failed
/// [`snapshot`](crate::StateMonitor::snapshot) leaves the in-memory offset
/// map exactly as it was.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The time-in-state file or the offsets file could not be opened,
    /// read, or written.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// A line in the time-in-state file did not parse as two integers.
    /// The whole read is aborted; there are no partial snapshots.
    #[error("malformed time-in-state line: {line:?}")]
    Parse { line: String },

    /// The persisted offsets file held something other than a JSON map of
    /// integer frequencies to integer durations.
    #[error("offsets file is not a valid offset map: {0}")]
    Persist(#[from] serde_json::Error),
}

impl MonitorError {
    pub(crate) fn parse(line: &str) -> Self {
        Self::Parse {
            line: line.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
