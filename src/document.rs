//! Canonical hierarchical document of a snapshot.
//!
//! The tree is fully ordered so two documents built from the same snapshot
//! serialize byte for byte identically:
//!
//! ```text
//! Document
//! ├── hosts            (by host name)
//! │   └── processes    (by "<name> <pid>" label)
//! │       ├── publishers   (by topic, with frequency and size)
//! │       └── subscribers  (by topic)
//! └── messages         (by topic, omitted when empty)
//! ```

use serde::Serialize;

use crate::index::{ProcessEntry, ProcessKey, SnapshotIndex};

/// Root of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub hosts: Vec<HostNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostNode {
    pub name: String,
    pub processes: Vec<ProcessNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessNode {
    /// `"<name> <pid>"`, the sort key within a host.
    pub label: String,
    pub name: String,
    pub pid: u32,
    pub memory: u64,
    pub cpu: f64,
    pub publishers: Vec<PublisherNode>,
    pub subscribers: Vec<SubscriberNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublisherNode {
    pub topic: String,
    pub frequency: f64,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriberNode {
    pub topic: String,
}

/// One row of the topic type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageType {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Document {
    /// Build the document of an indexed snapshot.
    pub fn from_index(index: &SnapshotIndex) -> Self {
        let hosts = index
            .hosts
            .keys()
            .map(|host| {
                let mut processes: Vec<ProcessNode> = index
                    .processes_on(host)
                    .map(|(key, entry)| process_node(key, entry))
                    .collect();
                processes.sort_by(|a, b| a.label.cmp(&b.label));
                HostNode {
                    name: host.clone(),
                    processes,
                }
            })
            .collect();

        let messages = index
            .types
            .iter()
            .map(|(name, type_name)| MessageType {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
            .collect();

        Self { hosts, messages }
    }

    /// Total number of process nodes across all hosts.
    pub fn process_count(&self) -> usize {
        self.hosts.iter().map(|h| h.processes.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn process_node(key: &ProcessKey, entry: &ProcessEntry) -> ProcessNode {
    ProcessNode {
        label: key.label(),
        name: entry.name.clone(),
        pid: key.pid,
        memory: entry.memory,
        cpu: entry.cpu,
        publishers: entry
            .publishers
            .iter()
            .map(|(topic, stats)| PublisherNode {
                topic: topic.clone(),
                frequency: stats.frequency,
                size: stats.size,
            })
            .collect(),
        subscribers: entry
            .subscribers
            .iter()
            .map(|topic| SubscriberNode {
                topic: topic.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busgraph_types::Snapshot;

    fn document(snapshot: &Snapshot) -> Document {
        Document::from_index(&SnapshotIndex::from_snapshot(snapshot).unwrap())
    }

    #[test]
    fn hosts_in_lexicographic_order() {
        let snapshot = Snapshot::builder()
            .process("b", 1, "p", |p| p.subscribe("t", "T"))
            .process("a", 1, "p", |p| p.subscribe("t", "T"))
            .build();
        let doc = document(&snapshot);

        let hosts: Vec<&str> = doc.hosts.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(hosts, vec!["a", "b"]);
    }

    #[test]
    fn processes_ordered_by_name_and_pid_label() {
        let snapshot = Snapshot::builder()
            .process("h", 2, "zeta", |p| p.subscribe("t", "T"))
            .process("h", 10, "alpha", |p| p.subscribe("t", "T"))
            .process("h", 9, "alpha", |p| p.subscribe("t", "T"))
            .build();
        let doc = document(&snapshot);

        let labels: Vec<&str> = doc.hosts[0]
            .processes
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        // Plain string order, so "alpha 10" sorts before "alpha 9".
        assert_eq!(labels, vec!["alpha 10", "alpha 9", "zeta 2"]);
    }

    #[test]
    fn topics_sorted_and_publishers_carry_statistics() {
        let snapshot = Snapshot::builder()
            .process("h", 1, "p", |p| {
                p.memory(512)
                    .cpu(0.25)
                    .publish("out_b", "B", 2.0, 20)
                    .publish("out_a", "A", 1.0, 10)
                    .subscribe("in_z", "Z")
                    .subscribe("in_y", "Y")
            })
            .build();
        let doc = document(&snapshot);
        let process = &doc.hosts[0].processes[0];

        assert_eq!(process.memory, 512);
        assert_eq!(process.cpu, 0.25);
        assert_eq!(
            process.publishers,
            vec![
                PublisherNode {
                    topic: "out_a".into(),
                    frequency: 1.0,
                    size: 10
                },
                PublisherNode {
                    topic: "out_b".into(),
                    frequency: 2.0,
                    size: 20
                },
            ]
        );
        let subscribers: Vec<&str> = process.subscribers.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(subscribers, vec!["in_y", "in_z"]);
    }

    #[test]
    fn type_table_sorted_by_topic() {
        let snapshot = Snapshot::builder()
            .process("h", 1, "p", |p| {
                p.publish("zebra", "Z", 1.0, 1).subscribe("alpha", "A")
            })
            .build();
        let doc = document(&snapshot);

        assert_eq!(
            doc.messages,
            vec![
                MessageType {
                    name: "alpha".into(),
                    type_name: "A".into()
                },
                MessageType {
                    name: "zebra".into(),
                    type_name: "Z".into()
                },
            ]
        );
    }

    #[test]
    fn empty_type_table_omitted_from_json() {
        let doc = Document::from_index(&SnapshotIndex::default());
        let json = doc.to_json().unwrap();

        assert_eq!(json, r#"{"hosts":[]}"#);
    }

    #[test]
    fn json_shape() {
        let snapshot = Snapshot::builder()
            .process("h1", 7, "cam", |p| p.memory(1).cpu(2.0).publish("img", "Image", 30.0, 100))
            .build();
        let value: serde_json::Value =
            serde_json::from_str(&document(&snapshot).to_json_pretty().unwrap()).unwrap();

        let process = &value["hosts"][0]["processes"][0];
        assert_eq!(value["hosts"][0]["name"], "h1");
        assert_eq!(process["label"], "cam 7");
        assert_eq!(process["publishers"][0]["topic"], "img");
        assert_eq!(process["publishers"][0]["size"], 100);
        assert_eq!(value["messages"][0]["type"], "Image");
    }

    #[test]
    fn identical_snapshots_serialize_identically() {
        let build = || {
            Snapshot::builder()
                .timestamp_ms(1)
                .process("h2", 1, "x", |p| p.publish("a", "A", 1.0, 1))
                .process("h1", 2, "y", |p| p.subscribe("a", "A").subscribe("b", "B"))
                .build()
        };

        assert_eq!(
            document(&build()).to_json().unwrap(),
            document(&build()).to_json().unwrap()
        );
        assert_eq!(document(&build()).process_count(), 2);
    }
}
