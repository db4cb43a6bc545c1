//! Error types for snapshot indexing.

use thiserror::Error;

/// Errors that make a snapshot unusable.
///
/// Each variant reflects an inconsistency in the captured data rather than a
/// transient fault, so retrying the same snapshot will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A topic record names a process with no resource metrics.
    #[error("no process metrics for {process} (host {host}, pid {pid}) referenced by topic {topic}")]
    MissingProcessMetrics {
        host: String,
        pid: u32,
        process: String,
        topic: String,
    },

    /// More than one metrics entry claims the same process instance.
    #[error("{count} process metrics entries match host {host}, pid {pid} (referenced by topic {topic})")]
    AmbiguousProcessMetrics {
        host: String,
        pid: u32,
        topic: String,
        count: usize,
    },
}

impl IndexError {
    /// Host of the offending process.
    pub fn host(&self) -> &str {
        match self {
            IndexError::MissingProcessMetrics { host, .. } => host,
            IndexError::AmbiguousProcessMetrics { host, .. } => host,
        }
    }

    /// Pid of the offending process.
    pub fn pid(&self) -> u32 {
        match self {
            IndexError::MissingProcessMetrics { pid, .. } => *pid,
            IndexError::AmbiguousProcessMetrics { pid, .. } => *pid,
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
