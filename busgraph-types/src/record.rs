//! Raw records captured from the messaging network.

use alloc::string::String;

/// The role a process plays on a topic, with the data that role reports.
///
/// Only publishers report a data frequency and payload size; a subscription
/// is presence-only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "direction", rename_all = "lowercase"))]
pub enum Endpoint {
    /// The process writes to the topic.
    Publisher {
        /// Observed update frequency in Hz.
        frequency: f64,
        /// Payload size in bytes.
        size: u64,
    },
    /// The process reads from the topic.
    Subscriber,
}

impl Endpoint {
    /// Create a publisher endpoint.
    pub fn publisher(frequency: f64, size: u64) -> Self {
        Endpoint::Publisher { frequency, size }
    }

    /// Returns true for publisher endpoints.
    pub fn is_publisher(&self) -> bool {
        matches!(self, Endpoint::Publisher { .. })
    }
}

/// One publisher or subscriber observed on one topic.
///
/// Several records may share a `(host, pid)` pair (one process with many
/// topics) or a topic name (many processes on one topic).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopicRecord {
    /// Name of the host the process runs on.
    pub host: String,

    /// Operating system process id.
    pub pid: u32,

    /// Display name of the owning process.
    #[cfg_attr(feature = "serde", serde(rename = "process"))]
    pub process_name: String,

    /// Topic name.
    pub topic: String,

    /// Declared payload type of the topic.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_name: String,

    /// Direction plus publisher-only statistics.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub endpoint: Endpoint,
}

impl TopicRecord {
    /// Create a new topic record.
    pub fn new(
        host: impl Into<String>,
        pid: u32,
        process_name: impl Into<String>,
        topic: impl Into<String>,
        type_name: impl Into<String>,
        endpoint: Endpoint,
    ) -> Self {
        Self {
            host: host.into(),
            pid,
            process_name: process_name.into(),
            topic: topic.into(),
            type_name: type_name.into(),
            endpoint,
        }
    }
}

/// Resource usage of one process.
///
/// A consistent snapshot holds exactly one of these per `(host, pid)` pair
/// referenced by its topic records.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessMetrics {
    /// Name of the host the process runs on.
    pub host: String,

    /// Operating system process id.
    pub pid: u32,

    /// Memory usage in bytes.
    pub memory: u64,

    /// CPU usage in percent.
    pub cpu: f64,
}

impl ProcessMetrics {
    /// Create new process metrics.
    pub fn new(host: impl Into<String>, pid: u32, memory: u64, cpu: f64) -> Self {
        Self {
            host: host.into(),
            pid,
            memory,
            cpu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_publishers_are_publishers() {
        assert!(Endpoint::publisher(1.0, 8).is_publisher());
        assert!(!Endpoint::Subscriber.is_publisher());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn publisher_record_wire_format() {
        let json = r#"{
            "host": "h1",
            "pid": 42,
            "process": "camera",
            "topic": "images",
            "type": "pb.Image",
            "direction": "publisher",
            "frequency": 30,
            "size": 1024
        }"#;

        let record: TopicRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.process_name, "camera");
        assert_eq!(record.type_name, "pb.Image");
        assert_eq!(record.endpoint, Endpoint::publisher(30.0, 1024));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn subscriber_record_has_no_statistics() {
        let record = TopicRecord::new("h1", 1, "viewer", "images", "pb.Image", Endpoint::Subscriber);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["direction"], "subscriber");
        assert!(value.get("frequency").is_none());
        assert!(value.get("size").is_none());
    }
}
