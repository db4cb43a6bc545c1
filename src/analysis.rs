//! The full snapshot-to-artifacts transform.

use busgraph_types::Snapshot;

use crate::document::Document;
use crate::error::Result;
use crate::index::SnapshotIndex;
use crate::topology::{Role, Topology};

/// Everything derived from one snapshot.
///
/// Each call builds fresh values from the snapshot alone, so analyses of
/// different snapshots can run concurrently.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub index: SnapshotIndex,
    pub topology: Topology,
    pub document: Document,
}

impl Analysis {
    /// Index the snapshot, then derive its topology and document.
    ///
    /// Fails without producing anything if the snapshot is inconsistent.
    pub fn of(snapshot: &Snapshot) -> Result<Self> {
        let index = SnapshotIndex::from_snapshot(snapshot)?;
        let topology = Topology::from_index(&index);
        let document = Document::from_index(&index);
        Ok(Self {
            index,
            topology,
            document,
        })
    }

    pub fn summary(&self) -> Summary {
        Summary {
            hosts: self.index.hosts.len(),
            processes: self.index.processes.len(),
            topics: self.index.types.len(),
            edges: self.topology.edges.len(),
            publishers_only: self.topology.count_role(Role::PublisherOnly),
            subscribers_only: self.topology.count_role(Role::SubscriberOnly),
            both: self.topology.count_role(Role::Both),
            neither: self.topology.count_role(Role::Neither),
            type_conflicts: self.index.type_conflicts(),
        }
    }
}

/// Counts describing an [`Analysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Summary {
    pub hosts: usize,
    pub processes: usize,
    pub topics: usize,
    pub edges: usize,
    pub publishers_only: usize,
    pub subscribers_only: usize,
    pub both: usize,
    pub neither: usize,
    pub type_conflicts: usize,
}
