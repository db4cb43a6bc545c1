//! # busgraph
//!
//! Derives a process topology and a canonical document from a point-in-time
//! snapshot of a publish/subscribe network.
//!
//! A snapshot is an unordered list of topic endpoints (who publishes or
//! subscribes to what, on which host) plus per-process resource metrics.
//! This crate normalizes it into a sorted host → process → topic hierarchy
//! and connects every publisher to every subscriber of the same topic.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────────────┐   ┌────────────┐   ┌──────────────┐
//! │  source  │──▶│      index      │──▶│  topology  │──▶│ DOT / graph  │
//! │(Snapshot)│   │ (SnapshotIndex) │   │(nodes,edges)   │  (output)    │
//! └──────────┘   └───────┬─────────┘   └────────────┘   └──────────────┘
//!                        │             ┌────────────┐   ┌──────────────┐
//!                        └────────────▶│  document  │──▶│ JSON (output)│
//!                                      └────────────┘   └──────────────┘
//! ```
//!
//! - **[`source`]**: Reads a snapshot JSON file and checks its schema version
//! - **[`index`]**: Groups records per process, attaches metrics, builds the type table
//! - **[`topology`]**: Role classification and publisher → subscriber edge derivation
//! - **[`document`]**: Ordered hierarchical document
//! - **[`output`]**: File writers with extension handling
//!
//! ## Usage
//!
//! ```
//! use busgraph::{Analysis, Role, Snapshot};
//!
//! let snapshot = Snapshot::builder()
//!     .process("h1", 1, "multi_hello_snd", |p| p.publish("Hello1", "std::string", 100.0, 18))
//!     .process("h1", 2, "multi_hello_rec", |p| p.subscribe("Hello1", "std::string"))
//!     .build();
//!
//! let analysis = Analysis::of(&snapshot)?;
//! assert_eq!(analysis.topology.edges.len(), 1);
//! assert_eq!(analysis.topology.nodes[0].role, Role::SubscriberOnly);
//! # Ok::<(), busgraph::IndexError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod output;
pub mod source;
pub mod topology;

pub use analysis::{Analysis, Summary};
pub use busgraph_types::{Endpoint, ProcessMetrics, Snapshot, TopicRecord};
pub use document::Document;
pub use error::IndexError;
pub use index::{HostIndex, ProcessEntry, ProcessKey, SnapshotIndex, TopicTypeRegistry};
pub use source::{check_version, FileSource};
pub use topology::{Edge, Node, Role, Topology};
