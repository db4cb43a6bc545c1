//! Snapshot normalization.
//!
//! Groups the flat topic records of a [`Snapshot`] by process instance and
//! attaches each process's resource metrics.
//!
//! ## Submodules
//!
//! - [`process`]: Process identity ([`ProcessKey`]) and aggregated data ([`ProcessEntry`])
//! - [`registry`]: First-seen-wins topic type table ([`TopicTypeRegistry`])
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot { topics, processes }
//!        │
//!        ▼
//! SnapshotIndex::build()
//!        │
//!        ├──▶ HostIndex        (host -> process keys)
//!        ├──▶ ProcessEntry map (process key -> publishers, subscribers, metrics)
//!        └──▶ TopicTypeRegistry
//! ```

pub mod process;
pub mod registry;

pub use process::{ProcessEntry, ProcessKey, PublisherStats};
pub use registry::TopicTypeRegistry;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use busgraph_types::{Endpoint, ProcessMetrics, Snapshot, TopicRecord};
use tracing::debug;

use crate::error::{IndexError, Result};

/// Host name to the processes observed on that host.
pub type HostIndex = BTreeMap<String, BTreeSet<ProcessKey>>;

/// Normalized form of one snapshot.
///
/// Built from scratch for every snapshot and never updated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotIndex {
    pub hosts: HostIndex,
    pub processes: BTreeMap<ProcessKey, ProcessEntry>,
    pub types: TopicTypeRegistry,
}

impl SnapshotIndex {
    /// Index a snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        Self::build(&snapshot.topics, &snapshot.processes)
    }

    /// Index topic records against process metrics.
    ///
    /// Records are visited once, in input order. The first record of a process
    /// looks up that process's metrics by exact `(host, pid)`; finding none or
    /// several aborts the whole index. A repeated `(process, topic, direction)`
    /// record overwrites the earlier one.
    pub fn build(topics: &[TopicRecord], processes: &[ProcessMetrics]) -> Result<Self> {
        let metrics = metrics_by_process(processes);
        let mut index = SnapshotIndex::default();

        for record in topics {
            let key = ProcessKey::new(&record.process_name, record.pid, &record.host);

            let entry = match index.processes.entry(key) {
                Entry::Occupied(occupied) => occupied.into_mut(),
                Entry::Vacant(vacant) => {
                    let found = metrics
                        .get(&(record.host.as_str(), record.pid))
                        .map(Vec::as_slice)
                        .unwrap_or_default();

                    let process_metrics = match found {
                        [single] => *single,
                        [] => {
                            return Err(IndexError::MissingProcessMetrics {
                                host: record.host.clone(),
                                pid: record.pid,
                                process: record.process_name.clone(),
                                topic: record.topic.clone(),
                            })
                        }
                        many => {
                            return Err(IndexError::AmbiguousProcessMetrics {
                                host: record.host.clone(),
                                pid: record.pid,
                                topic: record.topic.clone(),
                                count: many.len(),
                            })
                        }
                    };

                    debug!("New process entry {}", vacant.key());
                    index
                        .hosts
                        .entry(record.host.clone())
                        .or_default()
                        .insert(vacant.key().clone());
                    vacant.insert(ProcessEntry::new(&record.process_name, process_metrics))
                }
            };

            match record.endpoint {
                Endpoint::Publisher { frequency, size } => {
                    entry
                        .publishers
                        .insert(record.topic.clone(), PublisherStats { frequency, size });
                }
                Endpoint::Subscriber => {
                    entry.subscribers.insert(record.topic.clone());
                }
            }

            index.types.observe(&record.topic, &record.type_name);
        }

        debug!(
            "Indexed {} records into {} processes on {} hosts ({} topic types)",
            topics.len(),
            index.processes.len(),
            index.hosts.len(),
            index.types.len()
        );

        Ok(index)
    }

    /// Number of type declarations dropped because they disagreed with an earlier one.
    pub fn type_conflicts(&self) -> usize {
        self.types.conflicts()
    }

    /// Look up a process entry.
    pub fn get(&self, key: &ProcessKey) -> Option<&ProcessEntry> {
        self.processes.get(key)
    }

    /// Processes on `host`, in key order.
    pub fn processes_on<'a>(
        &'a self,
        host: &str,
    ) -> impl Iterator<Item = (&'a ProcessKey, &'a ProcessEntry)> + 'a {
        self.hosts
            .get(host)
            .into_iter()
            .flatten()
            .filter_map(move |key| self.processes.get_key_value(key))
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

fn metrics_by_process(processes: &[ProcessMetrics]) -> HashMap<(&str, u32), Vec<&ProcessMetrics>> {
    let mut by_process: HashMap<(&str, u32), Vec<&ProcessMetrics>> = HashMap::new();
    for metrics in processes {
        by_process
            .entry((metrics.host.as_str(), metrics.pid))
            .or_default()
            .push(metrics);
    }
    by_process
}
