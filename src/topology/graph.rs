//! Hand-off of a [`Topology`] to graph layout tools.

use std::collections::HashMap;
use std::fmt;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use super::{Node, Topology};
use crate::index::ProcessKey;

/// Edge weight of the exported graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEdge {
    pub topic: String,
    pub sequence: usize,
}

impl fmt::Display for TopicEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.topic)
    }
}

impl Topology {
    /// Convert into a petgraph multigraph.
    ///
    /// Node indices follow node order and edge indices follow edge sequence
    /// numbers, so layout tools that depend on insertion order see the same
    /// graph every time.
    pub fn to_graph(&self) -> DiGraph<Node, TopicEdge> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut indices: HashMap<&ProcessKey, NodeIndex> = HashMap::with_capacity(self.nodes.len());

        for node in &self.nodes {
            indices.insert(&node.key, graph.add_node(node.clone()));
        }

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) =
                (indices.get(&edge.source), indices.get(&edge.destination))
            {
                graph.add_edge(
                    from,
                    to,
                    TopicEdge {
                        topic: edge.topic.clone(),
                        sequence: edge.sequence,
                    },
                );
            }
        }

        graph
    }

    /// Render as Graphviz DOT.
    ///
    /// Nodes are labelled with the process display name and filled by role;
    /// edges are labelled with the topic name.
    pub fn to_dot(&self) -> String {
        let graph = self.to_graph();
        format!(
            "{}",
            Dot::with_attr_getters(
                &graph,
                &[],
                &|_, _| String::new(),
                &|_, (_, node)| format!("style = filled, fillcolor = {} ", node.role.color()),
            )
        )
    }

    /// Render as Graphviz DOT without labels, for very large graphs.
    pub fn to_dot_unlabelled(&self) -> String {
        let graph = self.to_graph();
        format!(
            "{:?}",
            Dot::with_config(&graph, &[Config::EdgeNoLabel, Config::NodeNoLabel])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SnapshotIndex;
    use crate::topology::Role;
    use busgraph_types::Snapshot;

    fn sample() -> Topology {
        let snapshot = Snapshot::builder()
            .process("h1", 1, "P1", |p| p.publish("t1", "T", 1.0, 1).publish("t2", "T", 1.0, 1))
            .process("h1", 2, "P2", |p| p.subscribe("t1", "T").subscribe("t2", "T"))
            .process("h1", 3, "P3", |p| p.publish("t3", "T", 1.0, 1).subscribe("t3", "T"))
            .build();
        Topology::from_index(&SnapshotIndex::from_snapshot(&snapshot).unwrap())
    }

    #[test]
    fn graph_preserves_parallel_edges_and_self_loops() {
        let topology = sample();
        let graph = topology.to_graph();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let p1 = NodeIndex::new(0);
        let p2 = NodeIndex::new(1);
        let p3 = NodeIndex::new(2);
        assert_eq!(graph.edges_connecting(p1, p2).count(), 2);
        assert_eq!(graph.edges_connecting(p3, p3).count(), 1);
        assert_eq!(graph[p3].role, Role::Both);
    }

    #[test]
    fn graph_edges_follow_sequence_order() {
        let graph = sample().to_graph();

        let sequences: Vec<usize> = graph.edge_references().map(|e| e.weight().sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }

    #[test]
    fn dot_output_labels_and_colours() {
        let dot = sample().to_dot();

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"P1\""));
        assert!(dot.contains("label = \"t3\""));
        assert!(dot.contains("fillcolor = red"));
        assert!(dot.contains("fillcolor = green"));
        assert!(dot.contains("fillcolor = blue"));
        assert_eq!(dot.matches(" -> ").count(), 3);
    }

    #[test]
    fn unlabelled_dot_has_no_labels() {
        let dot = sample().to_dot_unlabelled();

        assert!(!dot.contains("label"));
        assert_eq!(dot.matches(" -> ").count(), 3);
    }
}
