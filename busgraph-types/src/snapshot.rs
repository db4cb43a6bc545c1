//! Snapshot - a point-in-time capture of a publish/subscribe network.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{Endpoint, ProcessMetrics, SchemaVersion, TopicRecord};

/// A point-in-time snapshot of every topic endpoint and process.
///
/// Both sequences are unordered. Nothing ties a [`TopicRecord`] to its
/// [`ProcessMetrics`] except the `(host, pid)` pair, so a snapshot can be
/// internally inconsistent; consumers are expected to validate that.
///
/// # Example
///
/// ```rust
/// use busgraph_types::Snapshot;
///
/// let snapshot = Snapshot::builder()
///     .timestamp_ms(1_703_160_000_000)
///     .process("h1", 1, "sender", |p| p.publish("hello", "std::string", 100.0, 12))
///     .process("h1", 2, "receiver", |p| p.subscribe("hello", "std::string"))
///     .build();
///
/// assert_eq!(snapshot.hosts().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: SchemaVersion,

    /// Unix timestamp in milliseconds when this snapshot was taken.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp_ms: u64,

    /// Every publisher and subscriber observed during the capture window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub topics: Vec<TopicRecord>,

    /// Resource usage of every observed process.
    #[cfg_attr(feature = "serde", serde(default))]
    pub processes: Vec<ProcessMetrics>,
}

impl Snapshot {
    /// Create a new, empty snapshot with the current timestamp.
    #[cfg(feature = "std")]
    pub fn new() -> Self {
        Self::with_timestamp(current_timestamp_ms())
    }

    /// Create a new, empty snapshot with a specific timestamp.
    pub fn with_timestamp(timestamp_ms: u64) -> Self {
        Self {
            version: SchemaVersion::current(),
            timestamp_ms,
            topics: Vec::new(),
            processes: Vec::new(),
        }
    }

    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Check if the snapshot holds no topic records.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Number of topic records.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Distinct host names referenced by topic records, in encounter order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        let mut seen = BTreeSet::new();
        self.topics
            .iter()
            .map(|t| t.host.as_str())
            .filter(move |host| seen.insert(*host))
    }

    /// Publisher records only.
    pub fn publishers(&self) -> impl Iterator<Item = &TopicRecord> {
        self.topics.iter().filter(|t| t.endpoint.is_publisher())
    }

    /// Subscriber records only.
    pub fn subscribers(&self) -> impl Iterator<Item = &TopicRecord> {
        self.topics.iter().filter(|t| !t.endpoint.is_publisher())
    }
}

#[cfg(feature = "std")]
impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing `Snapshot` instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    timestamp_ms: Option<u64>,
    topics: Vec<TopicRecord>,
    processes: Vec<ProcessMetrics>,
}

impl SnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a specific timestamp (milliseconds since Unix epoch).
    pub fn timestamp_ms(mut self, ts: u64) -> Self {
        self.timestamp_ms = Some(ts);
        self
    }

    /// Add a process together with its metrics and topic endpoints.
    ///
    /// This always produces a consistent entry: one [`ProcessMetrics`] and
    /// one [`TopicRecord`] per declared endpoint.
    pub fn process<F>(
        mut self,
        host: impl Into<String>,
        pid: u32,
        name: impl Into<String>,
        f: F,
    ) -> Self
    where
        F: FnOnce(ProcessBuilder) -> ProcessBuilder,
    {
        let host = host.into();
        let name = name.into();
        let process = f(ProcessBuilder::new());

        for (topic, type_name, endpoint) in process.endpoints {
            self.topics.push(TopicRecord {
                host: host.clone(),
                pid,
                process_name: name.clone(),
                topic,
                type_name,
                endpoint,
            });
        }
        self.processes.push(ProcessMetrics::new(host, pid, process.memory, process.cpu));
        self
    }

    /// Add a raw topic record without any metrics.
    pub fn topic(mut self, record: TopicRecord) -> Self {
        self.topics.push(record);
        self
    }

    /// Add raw process metrics without any topic records.
    pub fn metrics(mut self, metrics: ProcessMetrics) -> Self {
        self.processes.push(metrics);
        self
    }

    /// Build the snapshot.
    #[cfg(feature = "std")]
    pub fn build(self) -> Snapshot {
        Snapshot {
            version: SchemaVersion::current(),
            timestamp_ms: self.timestamp_ms.unwrap_or_else(current_timestamp_ms),
            topics: self.topics,
            processes: self.processes,
        }
    }

    /// Build the snapshot with a specific timestamp (for no_std).
    #[cfg(not(feature = "std"))]
    pub fn build(self) -> Snapshot {
        Snapshot {
            version: SchemaVersion::current(),
            timestamp_ms: self.timestamp_ms.unwrap_or(0),
            topics: self.topics,
            processes: self.processes,
        }
    }
}

/// Builder for a single process inside a [`SnapshotBuilder`].
#[derive(Debug, Default)]
pub struct ProcessBuilder {
    memory: u64,
    cpu: f64,
    endpoints: Vec<(String, String, Endpoint)>,
}

impl ProcessBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the memory usage in bytes.
    pub fn memory(mut self, bytes: u64) -> Self {
        self.memory = bytes;
        self
    }

    /// Set the CPU usage in percent.
    pub fn cpu(mut self, percent: f64) -> Self {
        self.cpu = percent;
        self
    }

    /// Declare a publisher on `topic`.
    pub fn publish(
        mut self,
        topic: impl Into<String>,
        type_name: impl Into<String>,
        frequency: f64,
        size: u64,
    ) -> Self {
        self.endpoints
            .push((topic.into(), type_name.into(), Endpoint::publisher(frequency, size)));
        self
    }

    /// Declare a subscriber on `topic`.
    pub fn subscribe(mut self, topic: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.endpoints
            .push((topic.into(), type_name.into(), Endpoint::Subscriber));
        self
    }
}

/// Get current timestamp in milliseconds since Unix epoch.
#[cfg(feature = "std")]
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_builder() {
        let snapshot = Snapshot::builder()
            .timestamp_ms(1703160000000)
            .process("h1", 1, "producer", |p| {
                p.memory(1024).cpu(2.5).publish("events", "Event", 10.0, 64)
            })
            .process("h2", 2, "consumer", |p| p.subscribe("events", "Event"))
            .build();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.timestamp_ms, 1703160000000);
        assert_eq!(snapshot.publishers().count(), 1);
        assert_eq!(snapshot.subscribers().count(), 1);
        assert_eq!(snapshot.processes[0], ProcessMetrics::new("h1", 1, 1024, 2.5));
        assert_eq!(snapshot.hosts().collect::<Vec<_>>(), vec!["h1", "h2"]);
    }

    #[test]
    fn test_hosts_deduplicated_in_encounter_order() {
        let snapshot = Snapshot::builder()
            .process("h2", 1, "a", |p| p.subscribe("t", "T").subscribe("u", "U"))
            .process("h1", 2, "b", |p| p.subscribe("t", "T"))
            .process("h2", 3, "c", |p| p.subscribe("t", "T"))
            .process("h3", 4, "d", |p| p.subscribe("t", "T"))
            .process("h1", 5, "e", |p| p.subscribe("t", "T"))
            .build();

        assert_eq!(snapshot.hosts().collect::<Vec<_>>(), vec!["h2", "h1", "h3"]);
    }

    #[test]
    fn test_raw_records_skip_metrics() {
        let snapshot = Snapshot::builder()
            .topic(TopicRecord::new("h9", 99, "ghost", "t", "T", Endpoint::Subscriber))
            .build();

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.processes.is_empty());
    }

    #[test]
    fn test_snapshot_version() {
        let snapshot = Snapshot::builder().build();
        assert!(snapshot.version.is_compatible());
        assert!(snapshot.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let snapshot = Snapshot::builder()
            .timestamp_ms(1703160000000)
            .process("h1", 1, "test", |p| {
                p.publish("out", "T", 1.5, 8).subscribe("in", "T")
            })
            .build();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_missing_version_defaults_to_current() {
        let parsed: Snapshot = serde_json::from_str(r#"{"topics": [], "processes": []}"#).unwrap();
        assert_eq!(parsed.version, SchemaVersion::current());
        assert_eq!(parsed.timestamp_ms, 0);
    }
}
