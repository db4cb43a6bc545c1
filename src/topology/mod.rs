//! Process topology derivation.
//!
//! Turns indexed process entries into a directed multigraph: one [`Node`] per
//! process, one [`Edge`] per (publisher, subscriber) pairing on a shared topic.
//!
//! ```text
//! ProcessEntry map
//!        │
//!        ├──▶ Role per process ─────────────▶ nodes
//!        │
//!        ├──▶ publishers_by_topic ─┐
//!        └──▶ subscribers_by_topic ┴─ cross product per topic ─▶ edges
//! ```

pub mod graph;

pub use graph::TopicEdge;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::index::{ProcessEntry, ProcessKey, SnapshotIndex};

/// A process's publish/subscribe role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    PublisherOnly,
    SubscriberOnly,
    Both,
    Neither,
}

impl Role {
    /// Classify from whether a process publishes and/or subscribes anything.
    pub fn classify(publishes: bool, subscribes: bool) -> Self {
        match (publishes, subscribes) {
            (true, true) => Role::Both,
            (true, false) => Role::PublisherOnly,
            (false, true) => Role::SubscriberOnly,
            (false, false) => Role::Neither,
        }
    }

    pub fn of(entry: &ProcessEntry) -> Self {
        Self::classify(entry.is_publisher(), entry.is_subscriber())
    }

    /// Fill colour used when drawing the node.
    pub fn color(&self) -> &'static str {
        match self {
            Role::PublisherOnly => "red",
            Role::SubscriberOnly => "green",
            Role::Both => "blue",
            Role::Neither => "white",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::PublisherOnly => "publisher-only",
            Role::SubscriberOnly => "subscriber-only",
            Role::Both => "both",
            Role::Neither => "neither",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One process in the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub key: ProcessKey,
    /// Process display name.
    pub label: String,
    pub role: Role,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A directed connection from a publishing process to a subscribing process.
///
/// `sequence` is unique across one build, so parallel edges between the same
/// pair of processes stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: ProcessKey,
    pub destination: ProcessKey,
    pub topic: String,
    pub sequence: usize,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }
}

/// Nodes and edges derived from one snapshot.
///
/// Nodes are in [`ProcessKey`] order. Edges are grouped by topic in
/// lexicographic order; within a topic, publishers and then subscribers
/// follow [`ProcessKey`] order. Building twice from the same input yields
/// identical output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    publishers_by_topic: BTreeMap<String, Vec<ProcessKey>>,
    subscribers_by_topic: BTreeMap<String, Vec<ProcessKey>>,
}

impl Topology {
    /// Build the topology of an indexed snapshot.
    pub fn from_index(index: &SnapshotIndex) -> Self {
        Self::build(&index.processes)
    }

    /// Build the topology from process entries.
    pub fn build(processes: &BTreeMap<ProcessKey, ProcessEntry>) -> Self {
        let nodes: Vec<Node> = processes
            .iter()
            .map(|(key, entry)| Node {
                key: key.clone(),
                label: entry.name.clone(),
                role: Role::of(entry),
            })
            .collect();

        let mut publishers_by_topic: BTreeMap<String, Vec<ProcessKey>> = BTreeMap::new();
        let mut subscribers_by_topic: BTreeMap<String, Vec<ProcessKey>> = BTreeMap::new();

        for (key, entry) in processes {
            for topic in entry.publishers.keys() {
                publishers_by_topic
                    .entry(topic.clone())
                    .or_default()
                    .push(key.clone());
            }
            for topic in &entry.subscribers {
                subscribers_by_topic
                    .entry(topic.clone())
                    .or_default()
                    .push(key.clone());
            }
        }

        let mut edges = Vec::new();
        for (topic, publishers) in &publishers_by_topic {
            let Some(subscribers) = subscribers_by_topic.get(topic) else {
                continue;
            };
            for source in publishers {
                for destination in subscribers {
                    edges.push(Edge {
                        source: source.clone(),
                        destination: destination.clone(),
                        topic: topic.clone(),
                        sequence: edges.len(),
                    });
                }
            }
        }

        debug!(
            "Built topology: {} nodes, {} edges over {} published and {} subscribed topics",
            nodes.len(),
            edges.len(),
            publishers_by_topic.len(),
            subscribers_by_topic.len()
        );

        Self {
            nodes,
            edges,
            publishers_by_topic,
            subscribers_by_topic,
        }
    }

    /// Topic name to the processes publishing it.
    pub fn publishers_by_topic(&self) -> &BTreeMap<String, Vec<ProcessKey>> {
        &self.publishers_by_topic
    }

    /// Topic name to the processes subscribing to it.
    pub fn subscribers_by_topic(&self) -> &BTreeMap<String, Vec<ProcessKey>> {
        &self.subscribers_by_topic
    }

    pub fn node(&self, key: &ProcessKey) -> Option<&Node> {
        self.nodes
            .binary_search_by(|n| n.key.cmp(key))
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// Edges leaving `key`.
    pub fn outgoing<'a>(&'a self, key: &'a ProcessKey) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.source == key)
    }

    /// Edges arriving at `key`.
    pub fn incoming<'a>(&'a self, key: &'a ProcessKey) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.destination == key)
    }

    /// Topics with publishers but no subscriber.
    pub fn unconsumed_topics(&self) -> impl Iterator<Item = &str> {
        self.publishers_by_topic
            .keys()
            .filter(|t| !self.subscribers_by_topic.contains_key(*t))
            .map(String::as_str)
    }

    /// Topics with subscribers but no publisher.
    pub fn unfed_topics(&self) -> impl Iterator<Item = &str> {
        self.subscribers_by_topic
            .keys()
            .filter(|t| !self.publishers_by_topic.contains_key(*t))
            .map(String::as_str)
    }

    /// Number of nodes with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.nodes.iter().filter(|n| n.role == role).count()
    }
}
