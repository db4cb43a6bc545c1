//! Per-process identity and aggregated topic data.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use busgraph_types::ProcessMetrics;
use serde::Serialize;

/// Identity of one running process instance.
///
/// Ordering is by display name, then pid, then host. Two processes sharing a
/// display name are distinct whenever their pid or host differ.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ProcessKey {
    pub name: String,
    pub pid: u32,
    pub host: String,
}

impl ProcessKey {
    pub fn new(name: impl Into<String>, pid: u32, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pid,
            host: host.into(),
        }
    }

    /// Composite label used to order processes within a host: `"<name> <pid>"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.pid)
    }
}

impl fmt::Display for ProcessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}[{}]", self.name, self.pid, self.host)
    }
}

/// Statistics reported by a publisher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PublisherStats {
    /// Observed update frequency in Hz.
    pub frequency: f64,
    /// Payload size in bytes.
    pub size: u64,
}

/// Everything known about one process after indexing.
///
/// The same topic may appear in both `publishers` and `subscribers`; the
/// direction picks the map, so a process can feed itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessEntry {
    pub name: String,
    pub memory: u64,
    pub cpu: f64,
    pub publishers: BTreeMap<String, PublisherStats>,
    pub subscribers: BTreeSet<String>,
}

impl ProcessEntry {
    /// Create an entry with no topics, seeded from the process metrics.
    pub fn new(name: impl Into<String>, metrics: &ProcessMetrics) -> Self {
        Self {
            name: name.into(),
            memory: metrics.memory,
            cpu: metrics.cpu,
            publishers: BTreeMap::new(),
            subscribers: BTreeSet::new(),
        }
    }

    pub fn is_publisher(&self) -> bool {
        !self.publishers.is_empty()
    }

    pub fn is_subscriber(&self) -> bool {
        !self.subscribers.is_empty()
    }
}
